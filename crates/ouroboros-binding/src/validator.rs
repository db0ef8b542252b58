//! Binding engine
//!
//! [`Validator::validate_and_bind`] runs two full passes over a record's
//! schema:
//!
//! 1. **Validate** - every rule of every field (nested records first) is
//!    checked against the raw data. The first failure aborts the call before
//!    anything is assigned.
//! 2. **Bind** - every field whose data key is present is converted and
//!    assigned. Fields whose key is absent keep their current value.
//!
//! There is no rollback: a conversion failure in the bind pass leaves fields
//! assigned so far in place. Bind into a scratch value and swap it in on
//! success when atomicity matters.

use crate::config::ValidatorConfig;
use crate::converters::{builtin_converters, BoxedConverter, Converter};
use crate::data::RawData;
use crate::errors::{BindError, BindResult};
use crate::registry::Registry;
use crate::rules::{builtin_rules, BoxedRule, Rule};
use crate::schema::{Bindable, FieldDescriptor, Schema, Slot};
use std::sync::Arc;

// ============================================================================
// Engine - registries plus the schema walkers
// ============================================================================

#[derive(Clone, Debug)]
pub(crate) struct Engine {
    rules: Registry<BoxedRule>,
    converters: Registry<BoxedConverter>,
    separator: char,
}

impl Engine {
    fn seeded(config: &ValidatorConfig) -> Self {
        let mut engine = Self {
            rules: Registry::new("rule"),
            converters: Registry::new("converter"),
            separator: config.rule_separator,
        };

        if config.builtin_rules {
            engine.rules.seed(builtin_rules());
        }
        if config.builtin_converters {
            engine.converters.seed(builtin_converters());
        }

        engine
    }

    /// Validation pass over one record level, recursing into nested records first
    pub(crate) fn check_rules<T>(&self, schema: &Schema<T>, data: &RawData) -> BindResult<()> {
        for field in schema.fields() {
            if let Slot::Nested(record) = &field.slot {
                record
                    .validate(self, data)
                    .map_err(|e| BindError::nested(&field.descriptor.name, e))?;
            }
        }

        for field in schema.fields() {
            if let Slot::Leaf(_) = &field.slot {
                self.check_field(&field.descriptor, data)?;
            }
        }

        Ok(())
    }

    fn check_field(&self, descriptor: &FieldDescriptor, data: &RawData) -> BindResult<()> {
        for rule_name in descriptor.rule_names(self.separator) {
            let Some(key) = descriptor.key() else {
                return Err(BindError::MissingTag {
                    field: descriptor.name.clone(),
                });
            };

            let rule = self
                .rules
                .lookup(rule_name)
                .ok_or_else(|| BindError::UnknownRule {
                    field: descriptor.name.clone(),
                    rule: rule_name.to_string(),
                })?;

            tracing::trace!(field = %descriptor.name, rule = rule_name, key, "Checking rule");

            rule.check(key, data, &[]).map_err(|source| BindError::Rule {
                field: descriptor.name.clone(),
                rule: rule_name.to_string(),
                source,
            })?;
        }

        Ok(())
    }

    /// Bind pass over one record level, recursing into nested records first
    pub(crate) fn init_data<T>(
        &self,
        schema: &Schema<T>,
        target: &mut T,
        data: &RawData,
    ) -> BindResult<()> {
        for field in schema.fields() {
            if let Slot::Nested(record) = &field.slot {
                record
                    .bind(self, target, data)
                    .map_err(|e| BindError::nested(&field.descriptor.name, e))?;
            }
        }

        for field in schema.fields() {
            let Slot::Leaf(setter) = &field.slot else {
                continue;
            };
            let descriptor = &field.descriptor;
            let Some(raw) = descriptor.key().and_then(|key| data.get(key)) else {
                continue;
            };

            let converter = self
                .converters
                .lookup(&descriptor.type_id)
                .ok_or_else(|| BindError::UnknownConverter {
                    field: descriptor.name.clone(),
                    type_id: descriptor.type_id.clone(),
                })?;

            tracing::trace!(
                field = %descriptor.name,
                type_id = %descriptor.type_id,
                "Converting value"
            );

            let conversion_error = |source| BindError::Conversion {
                field: descriptor.name.clone(),
                type_id: descriptor.type_id.clone(),
                source,
            };
            let value = converter
                .convert(raw, &descriptor.type_id, &[])
                .map_err(conversion_error)?;
            setter(target, value).map_err(conversion_error)?;
        }

        Ok(())
    }
}

// ============================================================================
// Validator
// ============================================================================

/// Validates raw string data and binds it into [`Bindable`] records
///
/// `Validator::new()` returns a ready instance seeded with the built-in rules
/// and converters. `Validator::default()` is the uninitialized state: every
/// operation on it fails with [`BindError::NotInitialized`] until
/// [`initialize`](Self::initialize) is called.
///
/// Registration takes `&mut self` and binding takes `&self`, so a configured
/// instance can be shared (e.g. behind an `Arc`) across threads binding
/// independent records.
///
/// # Example
///
/// ```rust
/// use ouroboros_binding::{Bindable, RawData, Schema, Validator};
/// use once_cell::sync::Lazy;
///
/// #[derive(Default)]
/// struct Query {
///     page: u32,
///     search: String,
/// }
///
/// impl Bindable for Query {
///     fn schema() -> &'static Schema<Self> {
///         static SCHEMA: Lazy<Schema<Query>> = Lazy::new(|| {
///             Schema::<Query>::builder("Query")
///                 .field("page", |q: &mut Query| &mut q.page, |f| {
///                     f.data_key("page").rules("unsigned")
///                 })
///                 .field("search", |q: &mut Query| &mut q.search, |f| {
///                     f.data_key("q").rules("required")
///                 })
///                 .build()
///         });
///         &SCHEMA
///     }
/// }
///
/// let validator = Validator::new();
/// let mut query = Query::default();
/// validator
///     .validate_and_bind(&RawData::from_query("q=rust&page=2"), &mut query)
///     .unwrap();
///
/// assert_eq!(query.page, 2);
/// assert_eq!(query.search, "rust");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Validator {
    engine: Option<Engine>,
    config: ValidatorConfig,
}

impl Validator {
    /// Create a validator seeded with the built-in rules and converters
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    /// Create a validator with custom configuration
    pub fn with_config(config: ValidatorConfig) -> Self {
        let mut validator = Self {
            engine: None,
            config,
        };
        validator.initialize();
        validator
    }

    /// (Re)build the registries from the configuration
    ///
    /// Any previously registered custom rules and converters are dropped.
    pub fn initialize(&mut self) {
        self.engine = Some(Engine::seeded(&self.config));
    }

    /// Whether the registries have been built
    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// Register a rule, overwriting any rule of the same name
    pub fn register_rule(&mut self, name: &str, rule: impl Rule + 'static) -> BindResult<()> {
        let engine = self.engine.as_mut().ok_or(BindError::NotInitialized)?;
        engine.rules.register(name, Arc::new(rule))
    }

    /// Register a converter, overwriting any converter for the same type identifier
    pub fn register_converter(
        &mut self,
        type_id: &str,
        converter: impl Converter + 'static,
    ) -> BindResult<()> {
        let engine = self.engine.as_mut().ok_or(BindError::NotInitialized)?;
        engine.converters.register(type_id, Arc::new(converter))
    }

    /// Check whether a rule name resolves
    pub fn has_rule(&self, name: &str) -> bool {
        self.engine.as_ref().is_some_and(|e| e.rules.contains(name))
    }

    /// Check whether a type identifier resolves to a converter
    pub fn has_converter(&self, type_id: &str) -> bool {
        self.engine
            .as_ref()
            .is_some_and(|e| e.converters.contains(type_id))
    }

    /// Run the validation pass alone; nothing is assigned
    pub fn validate<T: Bindable>(&self, data: &RawData) -> BindResult<()> {
        let engine = self.engine()?;
        engine.check_rules(T::schema(), data)
    }

    /// Validate `data` against `T`'s rules, then convert and assign every
    /// field whose data key is present
    ///
    /// Fails fast: the first violated rule aborts before any assignment, and
    /// the first failed conversion aborts the bind pass.
    pub fn validate_and_bind<T: Bindable>(&self, data: &RawData, target: &mut T) -> BindResult<()> {
        let engine = self.engine()?;
        let schema = T::schema();

        tracing::debug!(record = schema.name(), keys = data.len(), "Validating raw data");
        if let Err(e) = engine.check_rules(schema, data) {
            tracing::debug!(record = schema.name(), error = %e, "Validation failed");
            return Err(e);
        }

        tracing::debug!(record = schema.name(), "Binding validated data");
        if let Err(e) = engine.init_data(schema, target, data) {
            tracing::debug!(record = schema.name(), error = %e, "Binding failed");
            return Err(e);
        }

        tracing::debug!(record = schema.name(), "Record bound");
        Ok(())
    }

    fn engine(&self) -> BindResult<&Engine> {
        self.engine.as_ref().ok_or(BindError::NotInitialized)
    }
}
