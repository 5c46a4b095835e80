//! The top-level config aggregate.

use super::{err, iteration, report, search};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The top-level config structure: harness-wide defaults, distinct from the
/// per-call `Options` a test passes to `check_system` directly.
#[derive(Default, Serialize, Deserialize)]
pub struct Config {
    /// The reporter style.
    #[serde(default = "report::Strategy::from_env")]
    pub report: report::Strategy,
    /// The search engine's thread pool configuration.
    #[serde(default)]
    pub search: search::Config,
    /// The generative driver's iteration-count configuration.
    #[serde(default)]
    pub iteration: iteration::Config,
}

impl Config {
    /// Tries to dump this config to a TOML string.
    pub fn to_string(&self) -> err::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl FromStr for Config {
    type Err = err::Error;

    /// Tries to load a config from a TOML string.
    fn from_str(s: &str) -> err::Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
