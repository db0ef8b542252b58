//! Binding error types
//!
//! This module defines the error taxonomy for validation and binding failures.
//! Every failure surfaces to the caller as a single [`BindError`] that carries
//! the field, rule or converter, and sub-record context needed to diagnose it.

use std::fmt;
use thiserror::Error;

// ============================================================================
// Binding Result
// ============================================================================

/// Binding result type
pub type BindResult<T> = Result<T, BindError>;

// ============================================================================
// Error Kind Classification
// ============================================================================

/// Classification of binding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorKind {
    /// Bad argument (empty registry name, non-object JSON)
    InvalidArgument,

    /// Operation on a validator that was never initialized
    NotInitialized,

    /// A field declares rules but has no data key
    MissingTag,

    /// Rule name has no registered implementation
    UnknownRule,

    /// Type identifier has no registered converter
    UnknownConverter,

    /// `required` rule violated
    MissingField,

    /// Value does not match the grammar a rule expects
    InvalidFormat,

    /// Value matches the grammar but violates a constraint
    ConstraintViolation,

    /// A converter could not turn the raw string into the field's type
    ConversionError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid_argument"),
            Self::NotInitialized => write!(f, "not_initialized"),
            Self::MissingTag => write!(f, "missing_tag"),
            Self::UnknownRule => write!(f, "unknown_rule"),
            Self::UnknownConverter => write!(f, "unknown_converter"),
            Self::MissingField => write!(f, "missing_field"),
            Self::InvalidFormat => write!(f, "invalid_format"),
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::ConversionError => write!(f, "conversion_error"),
        }
    }
}

// ============================================================================
// Rule Error
// ============================================================================

/// Failure reported by a single rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} [{kind}]")]
pub struct RuleError {
    /// Error classification
    pub kind: ErrorKind,

    /// Data key the rule was checking
    pub key: String,

    /// Human-readable reason
    pub message: String,
}

impl RuleError {
    /// Create a new rule error
    pub fn new(kind: ErrorKind, key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing(key: impl Into<String>) -> Self {
        let key = key.into();
        let message = format!("required field '{}' is not present in map", key);
        Self::new(ErrorKind::MissingField, key, message)
    }

    /// Create an invalid format error
    pub fn invalid_format(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFormat, key, message)
    }

    /// Create a constraint violation error
    pub fn constraint(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConstraintViolation, key, message)
    }
}

// ============================================================================
// Convert Error
// ============================================================================

/// Failure reported by a converter or by assigning a converted value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConvertError {
    /// Human-readable reason
    pub message: String,
}

impl ConvertError {
    /// Create a new conversion error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Converted value does not fit the field's type
    pub fn mismatch(expected: &str, got: &str) -> Self {
        Self::new(format!("expected {} value, got {}", expected, got))
    }
}

// ============================================================================
// Bind Error
// ============================================================================

/// Error returned by [`Validator`](crate::Validator) operations
#[derive(Debug, Error)]
pub enum BindError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("validator not initialized: call Validator::new()")]
    NotInitialized,

    #[error("field '{field}' declares validation rules but has no data key")]
    MissingTag { field: String },

    #[error("rule '{rule}' on field '{field}' is not registered, add it with register_rule")]
    UnknownRule { field: String, rule: String },

    #[error("no converter for '{type_id}' (field '{field}'), add one with register_converter")]
    UnknownConverter { field: String, type_id: String },

    #[error("validation of field '{field}' failed at rule '{rule}': {source}")]
    Rule {
        field: String,
        rule: String,
        #[source]
        source: RuleError,
    },

    #[error("error converting field '{field}' to type '{type_id}': {source}")]
    Conversion {
        field: String,
        type_id: String,
        #[source]
        source: ConvertError,
    },

    #[error("sub-record '{record}': {source}")]
    Nested {
        record: String,
        #[source]
        source: Box<BindError>,
    },
}

impl BindError {
    /// Classification of the innermost failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotInitialized => ErrorKind::NotInitialized,
            Self::MissingTag { .. } => ErrorKind::MissingTag,
            Self::UnknownRule { .. } => ErrorKind::UnknownRule,
            Self::UnknownConverter { .. } => ErrorKind::UnknownConverter,
            Self::Rule { source, .. } => source.kind,
            Self::Conversion { .. } => ErrorKind::ConversionError,
            Self::Nested { source, .. } => source.kind(),
        }
    }

    /// Dotted path to the failing field (e.g. "inner.c"), if any
    pub fn field_path(&self) -> Option<String> {
        match self {
            Self::InvalidArgument(_) | Self::NotInitialized => None,
            Self::MissingTag { field }
            | Self::UnknownRule { field, .. }
            | Self::UnknownConverter { field, .. }
            | Self::Rule { field, .. }
            | Self::Conversion { field, .. } => Some(field.clone()),
            Self::Nested { record, source } => match source.field_path() {
                Some(inner) => Some(format!("{}.{}", record, inner)),
                None => Some(record.clone()),
            },
        }
    }

    /// Rule name for rule failures
    pub fn rule(&self) -> Option<&str> {
        match self {
            Self::UnknownRule { rule, .. } | Self::Rule { rule, .. } => Some(rule),
            Self::Nested { source, .. } => source.rule(),
            _ => None,
        }
    }

    pub(crate) fn nested(record: &str, source: BindError) -> Self {
        Self::Nested {
            record: record.to_string(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::MissingField.to_string(), "missing_field");
        assert_eq!(ErrorKind::UnknownRule.to_string(), "unknown_rule");
        assert_eq!(ErrorKind::ConversionError.to_string(), "conversion_error");
    }

    #[test]
    fn test_rule_error_constructors() {
        let err = RuleError::missing("a");
        assert_eq!(err.kind, ErrorKind::MissingField);
        assert_eq!(err.key, "a");
        assert!(err.to_string().contains("'a'"));

        let err = RuleError::constraint("b", "negative");
        assert_eq!(err.kind, ErrorKind::ConstraintViolation);
    }

    #[test]
    fn test_nested_kind_and_path() {
        let inner = BindError::Rule {
            field: "c".to_string(),
            rule: "int".to_string(),
            source: RuleError::invalid_format("c", "not an integer"),
        };
        let err = BindError::nested("outer", BindError::nested("inner", inner));

        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert_eq!(err.field_path().as_deref(), Some("outer.inner.c"));
        assert_eq!(err.rule(), Some("int"));

        let msg = err.to_string();
        assert!(msg.contains("sub-record 'outer'"));
        assert!(msg.contains("rule 'int'"));
        assert!(msg.contains("not an integer"));
    }

    #[test]
    fn test_top_level_errors_have_no_path() {
        assert!(BindError::NotInitialized.field_path().is_none());
        assert_eq!(BindError::NotInitialized.kind(), ErrorKind::NotInitialized);
        assert_eq!(
            BindError::InvalidArgument("empty".into()).kind(),
            ErrorKind::InvalidArgument
        );
    }
}
