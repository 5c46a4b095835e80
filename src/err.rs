//! Top-level errors: the infrastructure-invariant failures that abort a
//! trial immediately rather than flowing into its result.

use thiserror::Error;

/// Enumeration of errors that can happen in the core harness.
#[derive(Debug, Error)]
pub enum Error {
    /// The search engine was handed an empty set of thread results.
    #[error("cannot search the worldless void: no thread results were given")]
    EmptyThreadResults,

    /// `World::step` was asked to step a thread whose pending op carries no
    /// result annotation yet.
    #[error("missing result annotation on pending op for thread {0}")]
    MissingResultAnnotation(crate::history::ThreadId),

    /// A runner or search worker thread panicked.
    #[error("worker thread panicked")]
    ThreadPanic,

    /// A lock was poisoned by a panicking thread.
    #[error("lock poisoned")]
    LockPoisoned,

    /// A runner worker did not finish within its deadline.
    #[error("runner worker timed out")]
    RunnerTimedOut,

    /// Zero worker threads were requested for a pool that needs at least one.
    #[error("at least one thread is required")]
    NotEnoughThreads,

    /// Reporting configuration or output error.
    #[error("report error")]
    Report(#[from] crate::report::err::Error),

    /// Configuration error.
    #[error("config error")]
    Config(#[from] crate::config::err::Error),

    /// The generative driver's underlying `proptest` run failed for a
    /// reason other than an ordinary trial failure (e.g. it could not
    /// produce a value from a strategy).
    #[error("generative driver error: {0}")]
    Generative(String),
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Self::LockPoisoned
    }
}

/// Results over [Error].
pub type Result<T> = std::result::Result<T, Error>;
