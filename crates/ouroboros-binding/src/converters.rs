//! Converters from raw strings to native values
//!
//! Converters are keyed by type identifier. The identifier of the field being
//! bound is passed back to the converter, so one implementation can serve a
//! family of types (the built-in integer converter does this for `int`,
//! `uint` and `int64`).

use crate::errors::ConvertError;
use crate::formats;
use crate::types::{type_ids, Value};
use std::sync::Arc;

// ============================================================================
// Converter Trait
// ============================================================================

/// Turns a raw string into a native [`Value`]
pub trait Converter: Send + Sync {
    /// Convert `raw` for a field declared as `type_id`
    fn convert(&self, raw: &str, type_id: &str, params: &[&str]) -> Result<Value, ConvertError>;
}

/// Type alias for a shared converter
pub type BoxedConverter = Arc<dyn Converter>;

impl<C: Converter + ?Sized> Converter for Arc<C> {
    fn convert(&self, raw: &str, type_id: &str, params: &[&str]) -> Result<Value, ConvertError> {
        (**self).convert(raw, type_id, params)
    }
}

/// Create a converter from a function
pub struct FnConverter<F>
where
    F: Fn(&str, &str, &[&str]) -> Result<Value, ConvertError> + Send + Sync,
{
    convert_fn: F,
}

impl<F> FnConverter<F>
where
    F: Fn(&str, &str, &[&str]) -> Result<Value, ConvertError> + Send + Sync,
{
    /// Create a new function-based converter
    pub fn new(convert_fn: F) -> Self {
        Self { convert_fn }
    }
}

impl<F> Converter for FnConverter<F>
where
    F: Fn(&str, &str, &[&str]) -> Result<Value, ConvertError> + Send + Sync,
{
    fn convert(&self, raw: &str, type_id: &str, params: &[&str]) -> Result<Value, ConvertError> {
        (self.convert_fn)(raw, type_id, params)
    }
}

// ============================================================================
// Built-in Converters
// ============================================================================

/// Base-10 integer; `type_id` picks the output class
pub fn convert_int(raw: &str, type_id: &str, _params: &[&str]) -> Result<Value, ConvertError> {
    let value = formats::parse_int(raw)
        .ok_or_else(|| ConvertError::new(format!("error converting '{}' to int", raw)))?;

    match type_id {
        type_ids::UINT => u64::try_from(value)
            .map(Value::UInt)
            .map_err(|_| ConvertError::new(format!("error converting '{}' to uint", raw))),
        _ => Ok(Value::Int(value)),
    }
}

/// RFC 3339 timestamp
pub fn convert_time(raw: &str, _type_id: &str, _params: &[&str]) -> Result<Value, ConvertError> {
    formats::parse_rfc3339(raw)
        .map(Value::Time)
        .ok_or_else(|| ConvertError::new(format!("error parsing time string '{}'", raw)))
}

/// Identity; never fails
pub fn convert_string(raw: &str, _type_id: &str, _params: &[&str]) -> Result<Value, ConvertError> {
    Ok(Value::String(raw.to_string()))
}

/// Permissive boolean (`true/false/1/0/t/f`, any case)
pub fn convert_bool(raw: &str, _type_id: &str, _params: &[&str]) -> Result<Value, ConvertError> {
    formats::parse_bool_loose(raw)
        .map(Value::Bool)
        .ok_or_else(|| ConvertError::new(format!("error converting '{}' to bool", raw)))
}

/// Built-in converters in registration order
pub fn builtin_converters() -> Vec<(&'static str, BoxedConverter)> {
    fn boxed<F>(convert_fn: F) -> BoxedConverter
    where
        F: Fn(&str, &str, &[&str]) -> Result<Value, ConvertError> + Send + Sync + 'static,
    {
        Arc::new(FnConverter::new(convert_fn))
    }

    let int = boxed(convert_int);
    vec![
        (type_ids::INT, Arc::clone(&int)),
        (type_ids::UINT, Arc::clone(&int)),
        (type_ids::INT64, int),
        (type_ids::STRING, boxed(convert_string)),
        (type_ids::TIME, boxed(convert_time)),
        (type_ids::BOOL, boxed(convert_bool)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_convert_int_family() {
        assert_eq!(convert_int("123", "int", &[]).unwrap(), Value::Int(123));
        assert_eq!(convert_int("-123", "int", &[]).unwrap(), Value::Int(-123));
        assert_eq!(convert_int("123", "uint", &[]).unwrap(), Value::UInt(123));
        assert_eq!(convert_int("123", "int64", &[]).unwrap(), Value::Int(123));

        assert!(convert_int("-123", "uint", &[]).is_err());
        assert!(convert_int("qewrq", "uint", &[]).is_err());
        assert!(convert_int("1.5", "int", &[]).is_err());
        assert!(convert_int("+5", "int", &[]).is_err());
    }

    #[test]
    fn test_convert_string() {
        for raw in ["asdf", "", "234"] {
            assert_eq!(
                convert_string(raw, "string", &[]).unwrap(),
                Value::String(raw.to_string())
            );
        }
    }

    #[test]
    fn test_convert_time() {
        let raw = "2019-08-21T09:00:00Z";
        let expected = DateTime::parse_from_rfc3339(raw).unwrap();
        assert_eq!(
            convert_time(raw, type_ids::TIME, &[]).unwrap(),
            Value::Time(expected)
        );

        for bad in [
            "2019-000:00Z",
            "",
            "2019-08-21T41:00:00Z",
            "2019-32-21T41:00:00Z",
            "2019-08-21T23:59:60Z",
        ] {
            assert!(convert_time(bad, type_ids::TIME, &[]).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_convert_bool_is_permissive() {
        assert_eq!(
            convert_bool("TRUE", "bool", &[]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(convert_bool("1", "bool", &[]).unwrap(), Value::Bool(true));
        assert_eq!(
            convert_bool("False", "bool", &[]).unwrap(),
            Value::Bool(false)
        );
        assert!(convert_bool("sdasD", "bool", &[]).is_err());
    }

    #[test]
    fn test_builtin_converter_ids() {
        let ids: Vec<_> = builtin_converters().into_iter().map(|(id, _)| id).collect();
        assert_eq!(
            ids,
            vec!["int", "uint", "int64", "string", "chrono::DateTime", "bool"]
        );
    }
}
