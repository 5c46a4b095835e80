//! The reporter protocol: typed events the core emits to a pluggable
//! reporter. The core never prints directly; every user-visible line flows
//! through one of these.

use super::Outcome;
use crate::history::ThreadId;
use std::time::Duration;

/// A single assertion observed while checking an operation's result.
///
/// During search, these are captured into a world's `reports` buffer rather
/// than published immediately, since a search explores many paths that turn
/// out not to lie on the winning linearization. The trial driver decides
/// when to republish them (see [crate::trial]).
#[derive(Debug, Clone)]
pub struct Assertion {
    /// The thread that produced the checked operation.
    pub thread_id: ThreadId,
    /// The operation's debug name, for display.
    pub op: String,
    /// Whether the check passed.
    pub passed: bool,
}

/// A typed event emitted by the harness to the reporter.
#[derive(Debug, Clone)]
pub enum Event {
    /// A trial (one generated input, possibly repeated) is starting.
    TrialStart {
        /// Total ops across all threads in the generated input.
        op_count: usize,
        /// Thread count (concurrency) for this trial.
        concurrency: usize,
        /// How many repetitions this trial will run.
        repetitions: usize,
    },
    /// A repetition within a trial is starting: a fresh system is about to
    /// be constructed.
    TestStart {
        /// Which repetition, zero-indexed.
        repetition: usize,
    },
    /// The concurrent runner finished executing the generated ops.
    RunOps {
        /// Total ops run.
        op_count: usize,
        /// Thread count used.
        concurrency: usize,
        /// Wall-clock time taken.
        elapsed: Duration,
    },
    /// A repetition passed: the search engine found a valid linearization.
    TestPass {
        /// The number of remaining futures at the initial world.
        futures: u128,
        /// Number of distinct worlds visited during search.
        visited: usize,
        /// Wall-clock time taken by the search.
        elapsed: Duration,
        /// Assertions observed along the winning linearization.
        assertions: Vec<Assertion>,
    },
    /// A repetition failed: the search space was exhausted with no valid
    /// linearization.
    TestFail {
        /// The number of remaining futures at the initial world.
        futures: u128,
        /// Number of distinct worlds visited during search.
        visited: usize,
        /// Wall-clock time taken by the search.
        elapsed: Duration,
        /// Assertions observed along the final, representative re-run.
        assertions: Vec<Assertion>,
    },
    /// All repetitions of a trial passed.
    TrialPass,
    /// A trial failed on the given (zero-indexed) repetition.
    TrialFail {
        /// The repetition number that failed.
        repetition: usize,
    },
    /// The generative driver's final summary.
    Summary {
        /// How many generated inputs were tried.
        num_tests: usize,
        /// The overall outcome.
        result: Outcome,
    },
    /// A failing input was shrunk to a smaller one.
    Shrunk {
        /// How many shrink steps were taken.
        depth: usize,
        /// Total worlds visited across every shrink attempt's search.
        total_nodes_visited: usize,
        /// The outcome of the smallest failing input.
        result: Outcome,
    },
}
