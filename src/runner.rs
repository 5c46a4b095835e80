//! The concurrent execution harness: barrier-synchronized parallel
//! execution of per-thread operation sequences against a single shared
//! system under test.

use crate::history::{AnnotatedOp, ThreadHistory, ThreadId, ThreadPlan, Thrown};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Barrier};
use std::time::{Duration, Instant};

/// The result of running the concurrent harness once: the per-thread
/// histories plus timing telemetry for the reporter.
pub struct RunOutcome<Sys, Model> {
    /// Thread id to the ops that thread ran, each annotated with its result.
    pub history: ThreadHistory<Sys, Model>,
    /// Total number of ops executed across all threads.
    pub op_count: usize,
    /// Number of worker threads used (0 or 1 runs do not spawn threads).
    pub thread_count: usize,
    /// Wall-clock time spent running the plan.
    pub elapsed: Duration,
}

/// Runs `plan` against `system`.
///
/// - An empty plan returns an empty history immediately.
/// - A single-thread plan runs on the calling thread with no barrier.
/// - A multi-thread plan spawns one worker per thread, rendezvous'd at a
///   one-shot barrier so they proceed as simultaneously as the scheduler
///   allows.
///
/// A panic raised from an operation's `apply_to` is caught at the op
/// boundary and becomes that op's observed result (a [Thrown] value,
/// carrying the panic message) rather than propagating: the system under
/// test threw, and the thrown value flows into `check`/`update_model` like
/// any other observation. A panic that escapes the harness's own glue
/// (rather than `apply_to`) still propagates and is reported as
/// [crate::err::Error::ThreadPanic] by the caller via `crossbeam`'s scoped
/// join.
pub fn run<Sys, Model>(
    system: &Sys,
    plan: ThreadPlan<Sys, Model>,
) -> crate::err::Result<RunOutcome<Sys, Model>>
where
    Sys: Sync,
    Model: Send,
{
    let start = Instant::now();
    let op_count: usize = plan.iter().map(|(_, ops)| ops.len()).sum();

    if plan.is_empty() {
        return Ok(RunOutcome {
            history: Vec::new(),
            op_count: 0,
            thread_count: 0,
            elapsed: start.elapsed(),
        });
    }

    if plan.len() == 1 {
        let (tid, ops) = plan.into_iter().next().expect("checked len == 1");
        let annotated = run_sequence(system, tid, ops);
        return Ok(RunOutcome {
            history: vec![(tid, annotated)],
            op_count,
            thread_count: 1,
            elapsed: start.elapsed(),
        });
    }

    let thread_count = plan.len();
    let barrier = Barrier::new(thread_count);
    log::trace!("runner: spawning {thread_count} worker threads");

    let history = crossbeam::thread::scope(|scope| {
        let barrier = &barrier;
        let handles: Vec<_> = plan
            .into_iter()
            .map(|(tid, ops)| {
                scope.spawn(move |_| {
                    barrier.wait();
                    (tid, run_sequence(system, tid, ops))
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().map_err(|_| crate::err::Error::ThreadPanic))
            .collect::<crate::err::Result<Vec<_>>>()
    })
    .map_err(|_| crate::err::Error::ThreadPanic)??;

    log::trace!("runner: all {thread_count} worker threads rejoined");

    Ok(RunOutcome {
        history,
        op_count,
        thread_count,
        elapsed: start.elapsed(),
    })
}

/// Applies a single thread's op sequence to the system in program order,
/// catching any panic raised by an individual op's `apply_to` and storing
/// it as that op's result.
fn run_sequence<Sys, Model>(
    system: &Sys,
    tid: ThreadId,
    ops: Vec<Arc<dyn crate::op::Operation<Sys, Model>>>,
) -> Vec<Arc<AnnotatedOp<Sys, Model>>> {
    ops.into_iter()
        .map(|op| {
            let result = panic::catch_unwind(AssertUnwindSafe(|| op.apply_to(system)))
                .unwrap_or_else(|payload| Box::new(Thrown::from_panic_payload(payload)));
            Arc::new(AnnotatedOp {
                thread_id: tid,
                op,
                result: Some(result),
            })
        })
        .collect()
}
