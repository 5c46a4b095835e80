//! Config for the search engine's worker pool.

use super::err;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Configuration for the search engine's thread pool.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Number of search worker threads. `None` defaults to host CPU count.
    pub search_threads: Option<NonZeroUsize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_threads: None,
        }
    }
}

impl Config {
    /// Resolves the configured thread count, falling back to the host's
    /// available parallelism.
    pub fn resolve(&self) -> err::Result<NonZeroUsize> {
        match self.search_threads {
            Some(n) => Ok(n),
            None => std::thread::available_parallelism()
                .map_err(|_| err::Error::BadThreadCount("search_threads")),
        }
    }
}
