//! The worldline search engine (§4.4): finds a valid linearization of a
//! concurrent run's per-thread histories, or proves none exists.
//!
//! [run] picks between the linear fast path and full parallel best-first
//! search based on how many threads still have pending ops at the initial
//! world — mirroring the "only one thread has pending ops" entry-point rule.

pub mod linear;
pub mod parallel;

use crate::history::ThreadHistory;
use crate::report::Assertion;
use crate::world::World;
use std::hash::Hash;
use std::time::Duration;

/// The outcome of a search: the winning terminal world (if any) plus the
/// telemetry the trial driver reports to the user.
pub struct SearchOutcome<Sys, Model> {
    /// The terminal world reached by a valid linearization, or `None` if the
    /// search space was exhausted with no valid ordering.
    pub world: Option<World<Sys, Model>>,
    /// Number of search worker threads used (always 1 for the linear path).
    pub threads: usize,
    /// `futures` at the initial world.
    pub origin_futures: u128,
    /// Number of distinct worlds visited during the search.
    pub visited: usize,
    /// Assertion events captured from every `check` call evaluated during
    /// the search's final, futures-at-most-one descents (§4.4 step 2c;
    /// [crate::world::World::run_linear]) — both the linear fast path's own
    /// descent and every `futures == 1` terminal attempt a parallel worker
    /// ran. Branching exploration that never reaches a terminal does not
    /// contribute: only a descent that actually ran to completion (pass or
    /// prune) produces assertions. The trial driver uses the winning
    /// world's history (all passes, by construction) on success and this
    /// buffer directly on failure (see [crate::trial]).
    pub reports: Vec<Assertion>,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

/// Searches for a valid linearization of `thread_results` starting from
/// `model`.
///
/// Fatal per §7: an empty `thread_results` is "the worldless void" and
/// aborts the trial rather than reporting an ordinary failure.
pub fn run<Sys, Model>(
    search_threads: usize,
    model: Model,
    thread_results: ThreadHistory<Sys, Model>,
) -> crate::err::Result<SearchOutcome<Sys, Model>>
where
    Sys: Sync,
    Model: Clone + Eq + Hash + Send + Sync,
{
    if thread_results.is_empty() {
        return Err(crate::err::Error::EmptyThreadResults);
    }

    let origin = World::initialize(model, thread_results);

    if origin.active_thread_count() <= 1 {
        linear::run(origin)
    } else {
        parallel::run(search_threads, origin)
    }
}
