//! Parallel best-first search over worlds, ordered by ascending `futures`
//! (fewer remaining linearizations first).
//!
//! Grounded in the shared-queue-plus-single-assignment-result-cell shape
//! used by search harnesses elsewhere in the pack (the
//! `Mutex<Option<R>>` + `Condvar` + `AtomicBool` done-flag pattern), adapted
//! here to a priority queue instead of a plain work queue since §4.4 orders
//! expansion by `futures` rather than by discovery order.

use crate::report::Assertion;
use crate::world::{VisitKey, World};
use dashmap::DashSet;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering::SeqCst};
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

use super::SearchOutcome;

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Wraps a [World] for [BinaryHeap] ordering. `BinaryHeap` is a max-heap;
/// the `Ord` impl is reversed so the heap pops the world with the *fewest*
/// remaining futures first.
struct Entry<Sys, Model>(World<Sys, Model>);

impl<Sys, Model> PartialEq for Entry<Sys, Model> {
    fn eq(&self, other: &Self) -> bool {
        self.0.futures().value() == other.0.futures().value()
    }
}

impl<Sys, Model> Eq for Entry<Sys, Model> {}

impl<Sys, Model> PartialOrd for Entry<Sys, Model> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Sys, Model> Ord for Entry<Sys, Model> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.futures().value().cmp(&self.0.futures().value())
    }
}

enum PollOutcome<Sys, Model> {
    Item(World<Sys, Model>),
    TimedOutEmpty,
    SpuriousWake,
}

/// The shared priority queue: a locked binary heap plus a condvar so
/// pollers can block (with a timeout) rather than busy-spin.
struct Queue<Sys, Model> {
    heap: Mutex<BinaryHeap<Entry<Sys, Model>>>,
    condvar: Condvar,
}

impl<Sys, Model> Queue<Sys, Model> {
    fn new() -> Self {
        Self {
            heap: Mutex::new(BinaryHeap::new()),
            condvar: Condvar::new(),
        }
    }

    fn push(&self, world: World<Sys, Model>) -> crate::err::Result<()> {
        let mut heap = self.heap.lock()?;
        heap.push(Entry(world));
        self.condvar.notify_all();
        Ok(())
    }

    fn push_many(&self, worlds: impl IntoIterator<Item = World<Sys, Model>>) -> crate::err::Result<()> {
        let mut heap = self.heap.lock()?;
        let before = heap.len();
        heap.extend(worlds.into_iter().map(Entry));
        if heap.len() > before {
            self.condvar.notify_all();
        }
        Ok(())
    }

    fn is_empty(&self) -> crate::err::Result<bool> {
        Ok(self.heap.lock()?.is_empty())
    }

    fn poll(&self, timeout: Duration) -> crate::err::Result<PollOutcome<Sys, Model>> {
        let mut heap = self.heap.lock()?;
        if let Some(Entry(w)) = heap.pop() {
            return Ok(PollOutcome::Item(w));
        }
        let (mut heap, wait_result) = self.condvar.wait_timeout(heap, timeout)?;
        Ok(match heap.pop() {
            Some(Entry(w)) => PollOutcome::Item(w),
            None if wait_result.timed_out() => PollOutcome::TimedOutEmpty,
            None => PollOutcome::SpuriousWake,
        })
    }
}

/// The single-assignment result cell: the first worker to find a valid
/// terminal world, or to observe the space exhausted, wins.
struct ResultCell<Sys, Model> {
    slot: Mutex<Option<Option<World<Sys, Model>>>>,
    done: AtomicBool,
}

impl<Sys, Model> ResultCell<Sys, Model> {
    fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            done: AtomicBool::new(false),
        }
    }

    fn is_set(&self) -> bool {
        self.done.load(SeqCst)
    }

    /// Sets the result if unset; subsequent calls are no-ops (first wins).
    fn try_set(&self, value: Option<World<Sys, Model>>) -> crate::err::Result<()> {
        let mut slot = self.slot.lock()?;
        if slot.is_none() {
            *slot = Some(value);
            self.done.store(true, SeqCst);
        }
        Ok(())
    }

    fn into_inner(self) -> crate::err::Result<Option<World<Sys, Model>>> {
        Ok(self.slot.into_inner()?.flatten())
    }
}

fn worker_loop<Sys, Model>(
    queue: &Queue<Sys, Model>,
    visited: &DashSet<VisitKey<Model>>,
    result: &ResultCell<Sys, Model>,
    visited_count: &AtomicUsize,
    reports: &Mutex<Vec<Assertion>>,
) -> crate::err::Result<()>
where
    Sys: Sync,
    Model: Clone + Eq + Hash + Send + Sync,
{
    loop {
        if result.is_set() {
            return Ok(());
        }
        match queue.poll(POLL_TIMEOUT)? {
            PollOutcome::Item(world) => {
                let key = world.visit_key();
                if !visited.insert(key) {
                    continue;
                }
                visited_count.fetch_add(1, SeqCst);

                if world.futures().is_one() {
                    let (terminal, _steps, assertions) = world.run_linear()?;
                    reports.lock()?.extend(assertions);
                    if let Some(terminal) = terminal {
                        result.try_set(Some(terminal))?;
                    }
                } else {
                    let next = world.next_steps()?;
                    let fresh: Vec<_> = next
                        .into_iter()
                        .filter(|w| !visited.contains(&w.visit_key()))
                        .collect();
                    queue.push_many(fresh)?;
                }
            }
            PollOutcome::TimedOutEmpty => {
                if queue.is_empty()? && !result.is_set() {
                    result.try_set(None)?;
                }
            }
            PollOutcome::SpuriousWake => {}
        }
    }
}

/// Runs the full parallel best-first search described in §4.4, spawning
/// `search_threads` workers sharing a priority queue, a visited-set, and a
/// single-assignment result cell.
pub fn run<Sys, Model>(
    search_threads: usize,
    origin: World<Sys, Model>,
) -> crate::err::Result<SearchOutcome<Sys, Model>>
where
    Sys: Sync,
    Model: Clone + Eq + Hash + Send + Sync,
{
    if search_threads == 0 {
        return Err(crate::err::Error::NotEnoughThreads);
    }

    let start = Instant::now();
    let origin_futures = origin.futures().value();

    let queue = Queue::new();
    queue.push(origin)?;

    let visited: DashSet<VisitKey<Model>> = DashSet::new();
    let result = ResultCell::new();
    let visited_count = AtomicUsize::new(0);
    let reports: Mutex<Vec<Assertion>> = Mutex::new(Vec::new());

    log::trace!("search: spawning {search_threads} worker threads");

    crossbeam::thread::scope(|scope| -> crate::err::Result<()> {
        let handles: Vec<_> = (0..search_threads)
            .map(|_| scope.spawn(|_| worker_loop(&queue, &visited, &result, &visited_count, &reports)))
            .collect();
        for handle in handles {
            handle.join().map_err(|_| crate::err::Error::ThreadPanic)??;
        }
        Ok(())
    })
    .map_err(|_| crate::err::Error::ThreadPanic)??;

    log::trace!("search: all worker threads rejoined, visited {} worlds", visited.len());

    Ok(SearchOutcome {
        world: result.into_inner()?,
        threads: search_threads,
        origin_futures,
        visited: visited_count.load(SeqCst),
        reports: reports.into_inner()?,
        elapsed: start.elapsed(),
    })
}
