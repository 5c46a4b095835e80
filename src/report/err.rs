//! Error types for reporting and output.

use thiserror::Error;

/// Enumeration of possible reporting errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A general I/O error writing a report.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

/// Shorthand for a result over [Error]s.
pub type Result<T> = std::result::Result<T, Error>;
