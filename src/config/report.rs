//! Config for the reporter's output style.

use super::err;
use serde::{de::Visitor, Deserialize, Serialize};

/// Environment variable controlling the default reporter style.
pub const ENV_VAR: &str = "TEST_CARLY_STYLE";

/// String representations of reporter styles.
pub mod string {
    /// String representation of the verbose style.
    pub const VERBOSE: &str = "verbose";
    /// String representation of the terse style.
    pub const TERSE: &str = "terse";
    /// String representation of the dots style.
    pub const DOTS: &str = "dots";
    /// String representation of the silent style.
    pub const SILENT: &str = "silent";
    /// String representations of all reporter styles.
    pub const ALL: &[&str] = &[VERBOSE, TERSE, DOTS, SILENT];
}

/// Enumeration of reporter styles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Strategy {
    /// Prints one line per event, with full detail.
    Verbose,
    /// Prints one line per trial.
    Terse,
    /// Prints a single character per repetition (`.` pass, `F` fail).
    Dots,
    /// Prints nothing.
    Silent,
}

/// The default strategy is [Strategy::Dots], per the reporter protocol.
impl Default for Strategy {
    fn default() -> Self {
        Self::Dots
    }
}

impl std::str::FromStr for Strategy {
    type Err = err::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &*s.to_lowercase() {
            string::VERBOSE => Ok(Self::Verbose),
            string::TERSE => Ok(Self::Terse),
            string::DOTS => Ok(Self::Dots),
            string::SILENT => Ok(Self::Silent),
            other => Err(Self::Err::BadReportStyle(other.to_string())),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Verbose => string::VERBOSE,
                Self::Terse => string::TERSE,
                Self::Dots => string::DOTS,
                Self::Silent => string::SILENT,
            }
        )
    }
}

impl Serialize for Strategy {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Strategy {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(StrategyVisitor)
    }
}

struct StrategyVisitor;

impl<'de> Visitor<'de> for StrategyVisitor {
    type Value = Strategy;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(formatter, "one of: {}", string::ALL.join(", "))
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }
}

impl Strategy {
    /// Gets an iterator of all available strategies.
    pub fn all() -> impl Iterator<Item = Self> {
        vec![Self::Verbose, Self::Terse, Self::Dots, Self::Silent].into_iter()
    }

    /// Reads the strategy from [ENV_VAR], defaulting per [Default] if unset
    /// or unparseable.
    pub fn from_env() -> Self {
        std::env::var(ENV_VAR)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    /// Constructs the outputter this strategy selects, writing to `writer`.
    pub fn to_outputter<W: std::io::Write + Send + 'static>(
        self,
        writer: W,
        color: bool,
    ) -> Box<dyn crate::report::out::abs::Outputter> {
        match self {
            Self::Verbose => Box::new(crate::report::out::verbose::Verbose::new(writer, color)),
            Self::Terse => Box::new(crate::report::out::terse::Terse::new(writer)),
            Self::Dots => Box::new(crate::report::out::dots::Dots::new(writer)),
            Self::Silent => Box::new(crate::report::out::silent::Silent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_strings_in_sync() {
        let got_set: std::collections::HashSet<String> =
            string::ALL.iter().map(|x| x.to_string()).collect();
        let want_set: std::collections::HashSet<String> =
            Strategy::all().map(|x| x.to_string()).collect();
        assert_eq!(got_set, want_set)
    }

    #[test]
    fn roundtrip() {
        for s in Strategy::all() {
            assert_eq!(s.to_string().parse::<Strategy>().unwrap(), s);
        }
    }
}
