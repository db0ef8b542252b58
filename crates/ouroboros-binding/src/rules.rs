//! Validation rules
//!
//! A rule checks one data key against the whole raw map, so it can tell an
//! absent key from an empty one. Every built-in except `required` passes when
//! its key is absent; presence is `required`'s concern alone, which lets a
//! field declare `required,int` and have `int` fire only once presence holds.
//!
//! # Example
//!
//! ```rust
//! use ouroboros_binding::rules::{FnRule, Rule};
//! use ouroboros_binding::{RawData, RuleError};
//!
//! let interval = FnRule::new(|key, data, _params| match data.get(key) {
//!     Some("minute" | "hour" | "day") | None => Ok(()),
//!     Some(other) => Err(RuleError::constraint(key, format!("'{}' is not an interval", other))),
//! });
//!
//! let data = RawData::from([("e", "day")]);
//! assert!(interval.check("e", &data, &[]).is_ok());
//! ```

use crate::data::RawData;
use crate::errors::RuleError;
use crate::formats;
use std::sync::Arc;

// ============================================================================
// Rule Names
// ============================================================================

/// Key must be present
pub const REQUIRED: &str = "required";
/// Value must be a base-10 signed integer
pub const INT: &str = "int";
/// Value must be a base-10 integer without a minus sign
pub const UNSIGNED: &str = "unsigned";
/// Value must be an RFC 3339 timestamp
pub const TIME: &str = "time";
/// Value must be exactly "true" or "false"
pub const BOOL: &str = "bool";

// ============================================================================
// Rule Trait
// ============================================================================

/// A named check run during the validation pass
pub trait Rule: Send + Sync {
    /// Check `key` against `data`
    ///
    /// `params` are free-form extra arguments; the built-ins ignore them.
    fn check(&self, key: &str, data: &RawData, params: &[&str]) -> Result<(), RuleError>;
}

/// Type alias for a shared rule
pub type BoxedRule = Arc<dyn Rule>;

impl<R: Rule + ?Sized> Rule for Arc<R> {
    fn check(&self, key: &str, data: &RawData, params: &[&str]) -> Result<(), RuleError> {
        (**self).check(key, data, params)
    }
}

/// Create a rule from a function
pub struct FnRule<F>
where
    F: Fn(&str, &RawData, &[&str]) -> Result<(), RuleError> + Send + Sync,
{
    check_fn: F,
}

impl<F> FnRule<F>
where
    F: Fn(&str, &RawData, &[&str]) -> Result<(), RuleError> + Send + Sync,
{
    /// Create a new function-based rule
    pub fn new(check_fn: F) -> Self {
        Self { check_fn }
    }
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&str, &RawData, &[&str]) -> Result<(), RuleError> + Send + Sync,
{
    fn check(&self, key: &str, data: &RawData, params: &[&str]) -> Result<(), RuleError> {
        (self.check_fn)(key, data, params)
    }
}

// ============================================================================
// Built-in Rules
// ============================================================================

/// Fails with `MissingField` if `key` is absent
pub fn check_required(key: &str, data: &RawData, _params: &[&str]) -> Result<(), RuleError> {
    if !data.contains_key(key) {
        return Err(RuleError::missing(key));
    }
    Ok(())
}

/// Fails with `InvalidFormat` unless a present value is a base-10 integer
pub fn check_int(key: &str, data: &RawData, _params: &[&str]) -> Result<(), RuleError> {
    if let Some(value) = data.get(key) {
        if formats::parse_int(value).is_none() {
            return Err(RuleError::invalid_format(
                key,
                format!("failed to convert '{}' to int for key '{}'", value, key),
            ));
        }
    }
    Ok(())
}

/// Fails with `ConstraintViolation` on a leading `-`, then defers to [`check_int`]
pub fn check_unsigned(key: &str, data: &RawData, params: &[&str]) -> Result<(), RuleError> {
    if let Some(value) = data.get(key) {
        if value.starts_with('-') {
            return Err(RuleError::constraint(
                key,
                format!(
                    "value for key '{}' does not match constraint '{}'",
                    key, UNSIGNED
                ),
            ));
        }
    }
    check_int(key, data, params)
}

/// Fails with `InvalidFormat` unless a present value is an RFC 3339 timestamp
pub fn check_time(key: &str, data: &RawData, _params: &[&str]) -> Result<(), RuleError> {
    if let Some(value) = data.get(key) {
        if formats::parse_rfc3339(value).is_none() {
            return Err(RuleError::invalid_format(
                key,
                format!("'{}' is not an RFC 3339 timestamp", value),
            ));
        }
    }
    Ok(())
}

/// Fails with `InvalidFormat` unless a present value is `"true"` or `"false"`
///
/// This is stricter than the `bool` converter, which also takes `1`, `t`,
/// `TRUE` and so on.
pub fn check_bool(key: &str, data: &RawData, _params: &[&str]) -> Result<(), RuleError> {
    if let Some(value) = data.get(key) {
        if !formats::is_bool_literal(value) {
            return Err(RuleError::invalid_format(
                key,
                format!("'{}' is not a boolean literal (true/false)", value),
            ));
        }
    }
    Ok(())
}

/// Built-in rules in registration order
pub fn builtin_rules() -> Vec<(&'static str, BoxedRule)> {
    fn boxed<F>(check_fn: F) -> BoxedRule
    where
        F: Fn(&str, &RawData, &[&str]) -> Result<(), RuleError> + Send + Sync + 'static,
    {
        Arc::new(FnRule::new(check_fn))
    }

    vec![
        (REQUIRED, boxed(check_required)),
        (INT, boxed(check_int)),
        (UNSIGNED, boxed(check_unsigned)),
        (TIME, boxed(check_time)),
        (BOOL, boxed(check_bool)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn single(value: &str) -> RawData {
        RawData::from([("a", value)])
    }

    #[test]
    fn test_required() {
        assert!(check_required("a", &single("A"), &[]).is_ok());
        assert!(check_required("a", &single(""), &[]).is_ok());

        let err = check_required("c", &RawData::from([("b", "B")]), &[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingField);
        assert_eq!(err.key, "c");
    }

    #[test]
    fn test_int() {
        for ok in ["1234", "-1235", "0"] {
            assert!(check_int("a", &single(ok), &[]).is_ok(), "{}", ok);
        }
        for bad in ["asdf", "123wer", "3.05", "", "+5"] {
            let err = check_int("a", &single(bad), &[]).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidFormat, "{}", bad);
        }
    }

    #[test]
    fn test_unsigned() {
        assert!(check_unsigned("a", &single("1234"), &[]).is_ok());

        let err = check_unsigned("a", &single("-1234"), &[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ConstraintViolation);

        let err = check_unsigned("a", &single("-9.035"), &[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ConstraintViolation);

        for bad in ["1234asdas", "dasdaw", "9.03", "+5"] {
            let err = check_unsigned("a", &single(bad), &[]).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidFormat, "{}", bad);
        }
    }

    #[test]
    fn test_time() {
        assert!(check_time("a", &single("2019-08-21T09:00:00Z"), &[]).is_ok());
        for bad in [
            "201900:00Z",
            "2019-08-21T09:00:00",
            "2019-20-21T09:00:00",
            "2019-08-21T30:00:00",
            "2019-08-21 09:00:00",
            "2019-08-21T23:59:60Z",
        ] {
            let err = check_time("a", &single(bad), &[]).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidFormat, "{}", bad);
        }
    }

    #[test]
    fn test_bool() {
        assert!(check_bool("a", &single("true"), &[]).is_ok());
        assert!(check_bool("a", &single("false"), &[]).is_ok());
        assert!(check_bool("a", &single("TRUE"), &[]).is_err());
        assert!(check_bool("a", &single("1"), &[]).is_err());
    }

    #[test]
    fn test_absent_key_passes_every_rule_but_required() {
        let empty = RawData::new();
        assert!(check_int("a", &empty, &[]).is_ok());
        assert!(check_unsigned("a", &empty, &[]).is_ok());
        assert!(check_time("a", &empty, &[]).is_ok());
        assert!(check_bool("a", &empty, &[]).is_ok());
        assert!(check_required("a", &empty, &[]).is_err());
    }

    #[test]
    fn test_fn_rule_with_params() {
        let rule = FnRule::new(|key, data, params| {
            let value = data.get(key).unwrap_or_default();
            if params.iter().any(|p| *p == value) {
                Ok(())
            } else {
                Err(RuleError::constraint(key, "not allowed"))
            }
        });
        assert!(rule.check("a", &single("x"), &["x", "y"]).is_ok());
        assert!(rule.check("a", &single("z"), &["x", "y"]).is_err());
    }

    #[test]
    fn test_builtin_rule_names() {
        let names: Vec<_> = builtin_rules().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["required", "int", "unsigned", "time", "bool"]);
    }
}
