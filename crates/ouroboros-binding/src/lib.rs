//! Ouroboros Binding
//!
//! Declarative data binding for the Ouroboros framework: validate a flat
//! `key -> string` map (form fields, query parameters) against per-field
//! rules, then convert the values and populate a typed record.
//!
//! # Overview
//!
//! - A record opts in by implementing [`Bindable`], returning a static
//!   [`Schema`] that lists each field's data key, rules tag and setter.
//! - A [`Validator`] holds two registries: rule name -> [`Rule`] and type
//!   identifier -> [`Converter`]. Both are seeded with built-ins and accept
//!   custom entries.
//! - [`Validator::validate_and_bind`] runs a full validation pass, then a
//!   bind pass. Embedded records are handled first at each level.
//!
//! # Features
//!
//! - **Default**: Core binding, query-string decoding
//! - **serde**: Serialize [`RawData`] and [`ErrorKind`], build [`RawData`]
//!   from JSON objects
//!
//! # Example
//!
//! ```rust
//! use ouroboros_binding::{Bindable, ErrorKind, RawData, Schema, Validator};
//! use once_cell::sync::Lazy;
//!
//! #[derive(Debug, Default)]
//! struct Signup {
//!     email: String,
//!     age: i64,
//!     newsletter: bool,
//! }
//!
//! impl Bindable for Signup {
//!     fn schema() -> &'static Schema<Self> {
//!         static SCHEMA: Lazy<Schema<Signup>> = Lazy::new(|| {
//!             Schema::<Signup>::builder("Signup")
//!                 .field("email", |s: &mut Signup| &mut s.email, |f| {
//!                     f.data_key("email").rules("required")
//!                 })
//!                 .field("age", |s: &mut Signup| &mut s.age, |f| {
//!                     f.data_key("age").rules("required,int")
//!                 })
//!                 .field("newsletter", |s: &mut Signup| &mut s.newsletter, |f| {
//!                     f.data_key("news").rules("bool")
//!                 })
//!                 .build()
//!         });
//!         &SCHEMA
//!     }
//! }
//!
//! let validator = Validator::new();
//!
//! let mut signup = Signup::default();
//! let data = RawData::from([("email", "jane@example.com"), ("age", "31"), ("news", "true")]);
//! validator.validate_and_bind(&data, &mut signup).unwrap();
//! assert_eq!(signup.age, 31);
//! assert!(signup.newsletter);
//!
//! let err = validator
//!     .validate_and_bind(&RawData::from([("age", "31")]), &mut Signup::default())
//!     .unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::MissingField);
//! ```

// Public modules
pub mod config;
pub mod converters;
pub mod data;
pub mod errors;
pub mod formats;
pub mod registry;
pub mod rules;
pub mod schema;
pub mod types;
pub mod validator;

// Re-export commonly used types
pub use config::ValidatorConfig;
pub use converters::{BoxedConverter, Converter, FnConverter};
pub use data::RawData;
pub use errors::{BindError, BindResult, ConvertError, ErrorKind, RuleError};
pub use registry::Registry;
pub use rules::{BoxedRule, FnRule, Rule};
pub use schema::{Bindable, FieldDescriptor, Schema, SchemaBuilder};
pub use types::{type_ids, FieldType, Value};
pub use validator::Validator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_validator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Validator>();
        assert_send_sync::<RawData>();
        assert_send_sync::<BindError>();
    }
}
