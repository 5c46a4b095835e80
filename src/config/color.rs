//! Config for whether reporter output should be colorized.
//!
//! Per the reporter protocol, this is a plain boolean, defaulted from an
//! environment variable rather than a richer strategy enum (unlike the
//! report style, which genuinely has more than two states).

/// Environment variable controlling color output, per the reporter
/// protocol.
pub const ENV_VAR: &str = "TEST_CARLY_COLOR";

/// Tokens of [ENV_VAR] that are treated as false.
pub const FALSY: &[&str] = &["0", "false", "no"];

/// Resolves whether color output should be used: an explicit override, if
/// given, else [ENV_VAR] (falsy tokens disable color, anything else or an
/// unset variable enables it).
pub fn resolve(print_color: Option<bool>) -> bool {
    if let Some(explicit) = print_color {
        return explicit;
    }
    match std::env::var(ENV_VAR) {
        Ok(raw) => !is_falsy(&raw),
        Err(_) => true,
    }
}

fn is_falsy(raw: &str) -> bool {
    FALSY.contains(&raw.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_tokens_disable_color() {
        assert!(is_falsy("0"));
        assert!(is_falsy("false"));
        assert!(is_falsy("No"));
        assert!(!is_falsy("1"));
        assert!(!is_falsy("yes"));
    }

    #[test]
    fn explicit_override_wins() {
        assert!(resolve(Some(true)));
        assert!(!resolve(Some(false)));
    }
}
