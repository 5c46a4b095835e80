//! Config for the generative driver's iteration count.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// The default number of generated inputs for a concurrent (`concurrency >
/// 1`) check.
pub const DEFAULT_NUM_TESTS_CONCURRENT: usize = 20;
/// The default number of generated inputs for a linear (`concurrency == 1`)
/// check.
pub const DEFAULT_NUM_TESTS_LINEAR: usize = 100;

/// Configuration for how many inputs the generative driver tries.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Explicit override for `num_tests`. `None` uses the concurrency-aware
    /// default.
    pub num_tests: Option<NonZeroUsize>,
}

impl Config {
    /// Resolves the number of generated inputs to try, given whether this
    /// check is running concurrently.
    pub fn resolve(&self, concurrency: usize) -> usize {
        if let Some(n) = self.num_tests {
            return n.get();
        }
        if concurrency > 1 {
            DEFAULT_NUM_TESTS_CONCURRENT
        } else {
            DEFAULT_NUM_TESTS_LINEAR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_split_on_concurrency() {
        let cfg = Config::default();
        assert_eq!(cfg.resolve(1), DEFAULT_NUM_TESTS_LINEAR);
        assert_eq!(cfg.resolve(4), DEFAULT_NUM_TESTS_CONCURRENT);
    }

    #[test]
    fn explicit_override_wins() {
        let cfg = Config {
            num_tests: NonZeroUsize::new(7),
        };
        assert_eq!(cfg.resolve(1), 7);
        assert_eq!(cfg.resolve(8), 7);
    }
}
