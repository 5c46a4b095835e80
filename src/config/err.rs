//! Errors that can occur while parsing or loading configuration.

use thiserror::Error;

/// A configuration error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The user supplied the given string, which was a bad reporter style.
    #[error("unsupported reporter style: {0}")]
    BadReportStyle(String),

    /// The user supplied a thread count of zero where at least one is
    /// required.
    #[error("at least one thread is required for {0}")]
    BadThreadCount(&'static str),

    /// We couldn't deserialise the config from TOML.
    #[error("couldn't parse config: {0}")]
    Deserialize(#[from] toml::de::Error),

    /// We couldn't serialise the config to TOML.
    #[error("couldn't dump config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Results over [Error].
pub type Result<T> = std::result::Result<T, Error>;
