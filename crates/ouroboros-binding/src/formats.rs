//! Format grammars shared by rules and converters
//!
//! Regexes pin the exact textual shape (uppercase `T` and `Z`, no space
//! separator, no leap seconds, no `+` on integers); chrono and the integer
//! parser then enforce value ranges.

use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// Pre-compiled Regex Patterns
// ============================================================================

/// RFC 3339 timestamp shape
static RFC3339_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:[0-5]\d(\.\d{1,9})?(Z|[+-]\d{2}:\d{2})$").unwrap()
});

/// Base-10 integer shape (optional leading `-`, at least one digit)
static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").unwrap());

// ============================================================================
// Parsers
// ============================================================================

/// Parse an RFC 3339 timestamp
///
/// # Example
/// ```
/// use ouroboros_binding::formats::parse_rfc3339;
///
/// assert!(parse_rfc3339("2019-08-21T09:00:00Z").is_some());
/// assert!(parse_rfc3339("2019-08-21T09:00:00.5+02:00").is_some());
/// assert!(parse_rfc3339("2019-08-21 09:00:00Z").is_none());
/// ```
pub fn parse_rfc3339(value: &str) -> Option<DateTime<FixedOffset>> {
    if !RFC3339_REGEX.is_match(value) {
        return None;
    }
    DateTime::parse_from_rfc3339(value).ok()
}

/// Parse a base-10 signed integer that fits in 64 bits
///
/// # Example
/// ```
/// use ouroboros_binding::formats::parse_int;
///
/// assert_eq!(parse_int("-1235"), Some(-1235));
/// assert_eq!(parse_int("3.05"), None);
/// assert_eq!(parse_int("123wer"), None);
/// ```
pub fn parse_int(value: &str) -> Option<i64> {
    if !INTEGER_REGEX.is_match(value) {
        return None;
    }
    value.parse::<i64>().ok()
}

/// Strict boolean literal check (`"true"` / `"false"` only)
pub fn is_bool_literal(value: &str) -> bool {
    value == "true" || value == "false"
}

/// Permissive boolean parse (case-insensitive `true/false/1/0/t/f`)
pub fn parse_bool_loose(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339_accepts() {
        assert!(parse_rfc3339("2019-08-21T09:00:00Z").is_some());
        assert!(parse_rfc3339("2019-08-21T09:00:00+08:00").is_some());
        assert!(parse_rfc3339("2019-08-21T09:00:00.123456789-05:30").is_some());
    }

    #[test]
    fn test_rfc3339_rejects() {
        assert!(parse_rfc3339("201900:00Z").is_none());
        assert!(parse_rfc3339("2019-08-21T09:00:00").is_none());
        assert!(parse_rfc3339("2019-20-21T09:00:00Z").is_none());
        assert!(parse_rfc3339("2019-08-21T30:00:00Z").is_none());
        assert!(parse_rfc3339("2019-08-21T41:00:00Z").is_none());
        assert!(parse_rfc3339("2019-08-32T09:00:00Z").is_none());
        assert!(parse_rfc3339("2019-08-21 09:00:00Z").is_none());
        assert!(parse_rfc3339("2019-08-21t09:00:00z").is_none());
        assert!(parse_rfc3339("2019-08-21T23:59:60Z").is_none());
        assert!(parse_rfc3339("").is_none());
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("1234"), Some(1234));
        assert_eq!(parse_int("+7"), None);
        assert_eq!(parse_int("-0"), Some(0));
        assert_eq!(parse_int("asdf"), None);
        assert_eq!(parse_int(" 1"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("99999999999999999999"), None);
    }

    #[test]
    fn test_bool_grammars() {
        assert!(is_bool_literal("true"));
        assert!(is_bool_literal("false"));
        assert!(!is_bool_literal("TRUE"));
        assert!(!is_bool_literal("1"));

        assert_eq!(parse_bool_loose("TRUE"), Some(true));
        assert_eq!(parse_bool_loose("f"), Some(false));
        assert_eq!(parse_bool_loose("0"), Some(false));
        assert_eq!(parse_bool_loose("yes"), None);
    }
}
