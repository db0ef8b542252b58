//! Native values produced by converters
//!
//! This module defines the [`Value`] enum that converters return and the
//! [`FieldType`] trait that moves a converted value into a typed record field.

use crate::errors::ConvertError;
use chrono::{DateTime, FixedOffset, Utc};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Type Identifiers
// ============================================================================

/// Built-in type identifiers used as converter registry keys
pub mod type_ids {
    /// Signed integer (64-bit)
    pub const INT: &str = "int";
    /// Unsigned integer (64-bit)
    pub const UINT: &str = "uint";
    /// Explicit 64-bit signed integer
    pub const INT64: &str = "int64";
    /// UTF-8 string
    pub const STRING: &str = "string";
    /// Boolean
    pub const BOOL: &str = "bool";
    /// RFC 3339 timestamp (namespaced like any non-primitive type)
    pub const TIME: &str = "chrono::DateTime";
}

// ============================================================================
// Value Enum - Converted native values
// ============================================================================

/// Native value produced by a converter
#[derive(Clone)]
pub enum Value {
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Boolean
    Bool(bool),
    /// String
    String(String),
    /// Timestamp with its original UTC offset
    Time(DateTime<FixedOffset>),
    /// User-defined type produced by a registered converter
    Custom(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Wrap a user-defined value
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        Self::Custom(Arc::new(value))
    }

    /// Get human-readable type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::UInt(_) => "unsigned integer",
            Self::Bool(_) => "boolean",
            Self::String(_) => "string",
            Self::Time(_) => "timestamp",
            Self::Custom(_) => "custom",
        }
    }

    /// Borrow the inner value of a [`Value::Custom`] as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Custom(inner) => inner.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::String(v) => f.debug_tuple("String").field(v).finish(),
            Self::Time(v) => f.debug_tuple("Time").field(v).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// ============================================================================
// FieldType - Typed assignment target
// ============================================================================

/// A Rust type that can receive a converted [`Value`]
///
/// `TYPE_ID` is the default converter identifier for fields of this type; a
/// field descriptor may override it.
pub trait FieldType: Sized {
    /// Default converter registry key
    const TYPE_ID: &'static str;

    /// Take ownership of a converted value
    fn from_value(value: Value) -> Result<Self, ConvertError>;
}

macro_rules! impl_signed_field_type {
    ($($ty:ty),*) => {
        $(
            impl FieldType for $ty {
                const TYPE_ID: &'static str = type_ids::INT;

                fn from_value(value: Value) -> Result<Self, ConvertError> {
                    let out_of_range = |v: &dyn fmt::Display| {
                        ConvertError::new(format!("{} out of range for {}", v, stringify!($ty)))
                    };
                    match value {
                        Value::Int(v) => <$ty>::try_from(v).map_err(|_| out_of_range(&v)),
                        Value::UInt(v) => <$ty>::try_from(v).map_err(|_| out_of_range(&v)),
                        other => Err(ConvertError::mismatch("integer", other.type_name())),
                    }
                }
            }
        )*
    };
}

macro_rules! impl_unsigned_field_type {
    ($($ty:ty),*) => {
        $(
            impl FieldType for $ty {
                const TYPE_ID: &'static str = type_ids::UINT;

                fn from_value(value: Value) -> Result<Self, ConvertError> {
                    let out_of_range = |v: &dyn fmt::Display| {
                        ConvertError::new(format!("{} out of range for {}", v, stringify!($ty)))
                    };
                    match value {
                        Value::UInt(v) => <$ty>::try_from(v).map_err(|_| out_of_range(&v)),
                        Value::Int(v) => <$ty>::try_from(v).map_err(|_| out_of_range(&v)),
                        other => Err(ConvertError::mismatch("unsigned integer", other.type_name())),
                    }
                }
            }
        )*
    };
}

impl_signed_field_type!(i64, i32, i16, i8);
impl_unsigned_field_type!(u64, u32, u16, u8);

impl FieldType for String {
    const TYPE_ID: &'static str = type_ids::STRING;

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(ConvertError::mismatch("string", other.type_name())),
        }
    }
}

impl FieldType for bool {
    const TYPE_ID: &'static str = type_ids::BOOL;

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(ConvertError::mismatch("boolean", other.type_name())),
        }
    }
}

impl FieldType for DateTime<FixedOffset> {
    const TYPE_ID: &'static str = type_ids::TIME;

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Time(t) => Ok(t),
            other => Err(ConvertError::mismatch("timestamp", other.type_name())),
        }
    }
}

impl FieldType for DateTime<Utc> {
    const TYPE_ID: &'static str = type_ids::TIME;

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        DateTime::<FixedOffset>::from_value(value).map(|t| t.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_name() {
        assert_eq!(Value::Int(1).type_name(), "integer");
        assert_eq!(Value::UInt(1).type_name(), "unsigned integer");
        assert_eq!(Value::Bool(true).type_name(), "boolean");
        assert_eq!(Value::String("x".to_string()).type_name(), "string");
        assert_eq!(Value::custom(5u8).type_name(), "custom");
    }

    #[test]
    fn test_integer_field_types() {
        assert_eq!(i64::from_value(Value::Int(-7)).unwrap(), -7);
        assert_eq!(u32::from_value(Value::UInt(7)).unwrap(), 7);
        assert_eq!(u64::from_value(Value::Int(7)).unwrap(), 7);

        assert!(u64::from_value(Value::Int(-1)).is_err());
        assert!(i8::from_value(Value::Int(300)).is_err());
        assert!(i64::from_value(Value::String("1".to_string())).is_err());
    }

    #[test]
    fn test_default_type_ids() {
        assert_eq!(<i64 as FieldType>::TYPE_ID, "int");
        assert_eq!(<u16 as FieldType>::TYPE_ID, "uint");
        assert_eq!(<String as FieldType>::TYPE_ID, "string");
        assert_eq!(<DateTime<Utc> as FieldType>::TYPE_ID, "chrono::DateTime");
    }

    #[test]
    fn test_custom_downcast() {
        let value = Value::custom(String::from("oid"));
        assert_eq!(
            value.downcast_ref::<String>().map(String::as_str),
            Some("oid")
        );
        assert!(value.downcast_ref::<u32>().is_none());
        assert!(Value::Int(1).downcast_ref::<i64>().is_none());
    }

    #[test]
    fn test_utc_from_fixed_offset() {
        let t = DateTime::parse_from_rfc3339("2019-08-21T11:00:00+02:00").unwrap();
        let utc = DateTime::<Utc>::from_value(Value::Time(t)).unwrap();
        assert_eq!(utc.to_rfc3339(), "2019-08-21T09:00:00+00:00");
    }
}
