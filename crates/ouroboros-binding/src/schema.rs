//! Field descriptors and record schemas
//!
//! A record type opts into binding by implementing [`Bindable`], which hands
//! the engine a statically built [`Schema`]: one [`FieldDescriptor`] per field
//! plus a typed setter (leaf fields) or an accessor to an embedded record
//! (nested fields). Schemas are built once per type, typically in a
//! `once_cell::sync::Lazy` static.
//!
//! # Example
//!
//! ```rust
//! use ouroboros_binding::{Bindable, Schema};
//! use once_cell::sync::Lazy;
//!
//! #[derive(Default)]
//! struct Address {
//!     city: String,
//! }
//!
//! #[derive(Default)]
//! struct User {
//!     name: String,
//!     age: u32,
//!     address: Address,
//! }
//!
//! impl Bindable for Address {
//!     fn schema() -> &'static Schema<Self> {
//!         static SCHEMA: Lazy<Schema<Address>> = Lazy::new(|| {
//!             Schema::<Address>::builder("Address")
//!                 .field("city", |a: &mut Address| &mut a.city, |f| {
//!                     f.data_key("city")
//!                 })
//!                 .build()
//!         });
//!         &SCHEMA
//!     }
//! }
//!
//! impl Bindable for User {
//!     fn schema() -> &'static Schema<Self> {
//!         static SCHEMA: Lazy<Schema<User>> = Lazy::new(|| {
//!             Schema::<User>::builder("User")
//!                 .field("name", |u: &mut User| &mut u.name, |f| {
//!                     f.data_key("name").rules("required")
//!                 })
//!                 .field("age", |u: &mut User| &mut u.age, |f| {
//!                     f.data_key("age").rules("required, unsigned")
//!                 })
//!                 .nested("address", |u: &mut User| &mut u.address)
//!                 .build()
//!         });
//!         &SCHEMA
//!     }
//! }
//!
//! assert_eq!(User::schema().len(), 3);
//! ```

use crate::data::RawData;
use crate::errors::{BindResult, ConvertError};
use crate::types::{FieldType, Value};
use crate::validator::Engine;
use std::marker::PhantomData;

// ============================================================================
// Field Descriptor
// ============================================================================

/// Type identifier reported for nested record descriptors
pub const RECORD_TYPE_ID: &str = "record";

/// Binding metadata for one record field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name, used in error context
    pub name: String,
    /// Raw data key the field binds to
    pub data_key: Option<String>,
    /// Raw rules tag (comma-separated rule names)
    pub rules: Option<String>,
    /// Converter registry key for the field's native type
    pub type_id: String,
    /// Whether the field is an embedded record
    pub nested: bool,
}

impl FieldDescriptor {
    /// Create a leaf field descriptor
    pub fn new(name: impl Into<String>, type_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_key: None,
            rules: None,
            type_id: type_id.into(),
            nested: false,
        }
    }

    /// Create a nested record descriptor
    pub fn record(name: impl Into<String>) -> Self {
        Self {
            nested: true,
            ..Self::new(name, RECORD_TYPE_ID)
        }
    }

    /// Set the raw data key
    pub fn data_key(mut self, key: impl Into<String>) -> Self {
        self.data_key = Some(key.into());
        self
    }

    /// Set the rules tag (e.g. "required, int")
    pub fn rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = Some(rules.into());
        self
    }

    /// Override the converter type identifier
    pub fn type_id(mut self, type_id: impl Into<String>) -> Self {
        self.type_id = type_id.into();
        self
    }

    /// The data key, if set and non-empty
    pub fn key(&self) -> Option<&str> {
        self.data_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Rule names from the rules tag, split on `separator` and trimmed
    ///
    /// An absent tag or one holding a single empty entry yields no rules.
    /// Other empty entries (e.g. a trailing separator) are kept so the
    /// engine reports them as unknown rules.
    pub fn rule_names(&self, separator: char) -> Vec<&str> {
        let Some(rules) = self.rules.as_deref() else {
            return Vec::new();
        };
        if rules.is_empty() {
            return Vec::new();
        }
        rules.split(separator).map(str::trim).collect()
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Typed setter for a leaf field
pub(crate) type Setter<T> = Box<dyn Fn(&mut T, Value) -> Result<(), ConvertError> + Send + Sync>;

/// What the engine does with a field
pub(crate) enum Slot<T> {
    /// Convert and assign
    Leaf(Setter<T>),
    /// Recurse into an embedded record
    Nested(Box<dyn NestedRecord<T>>),
}

pub(crate) struct SchemaField<T> {
    pub(crate) descriptor: FieldDescriptor,
    pub(crate) slot: Slot<T>,
}

/// Static field table for a record type
pub struct Schema<T> {
    name: String,
    fields: Vec<SchemaField<T>>,
}

impl<T: 'static> Schema<T> {
    /// Start building a schema for a record named `name`
    pub fn builder(name: impl Into<String>) -> SchemaBuilder<T> {
        SchemaBuilder {
            schema: Schema {
                name: name.into(),
                fields: Vec::new(),
            },
        }
    }
}

impl<T> Schema<T> {
    /// Record name, used in logs
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field descriptors in declaration order
    pub fn descriptors(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().map(|f| &f.descriptor)
    }

    /// Look up a descriptor by field name
    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.descriptors().find(|d| d.name == name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the schema has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn fields(&self) -> &[SchemaField<T>] {
        &self.fields
    }
}

impl<T> std::fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("fields", &self.descriptors().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`Schema`]
pub struct SchemaBuilder<T> {
    schema: Schema<T>,
}

impl<T: 'static> SchemaBuilder<T> {
    /// Add a leaf field
    ///
    /// The type identifier defaults to `V::TYPE_ID`; `configure` sets the
    /// data key and rules and may override the identifier.
    pub fn field<V, C>(mut self, name: &str, accessor: fn(&mut T) -> &mut V, configure: C) -> Self
    where
        V: FieldType + 'static,
        C: FnOnce(FieldDescriptor) -> FieldDescriptor,
    {
        let descriptor = configure(FieldDescriptor::new(name, V::TYPE_ID));
        let setter: Setter<T> = Box::new(move |target: &mut T, value: Value| {
            *accessor(target) = V::from_value(value)?;
            Ok(())
        });

        self.schema.fields.push(SchemaField {
            descriptor,
            slot: Slot::Leaf(setter),
        });
        self
    }

    /// Add an embedded record, always recursed into
    pub fn nested<U>(mut self, name: &str, accessor: fn(&mut T) -> &mut U) -> Self
    where
        U: Bindable,
    {
        self.schema.fields.push(SchemaField {
            descriptor: FieldDescriptor::record(name),
            slot: Slot::Nested(Box::new(Embedded {
                accessor,
                _marker: PhantomData,
            })),
        });
        self
    }

    /// Finish the schema
    pub fn build(self) -> Schema<T> {
        self.schema
    }
}

// ============================================================================
// Bindable
// ============================================================================

/// A record type the engine can validate and populate
pub trait Bindable: Sized + 'static {
    /// The type's field table, built once
    fn schema() -> &'static Schema<Self>;
}

// ============================================================================
// Nested Records
// ============================================================================

/// Type-erased recursion into an embedded record of some `Bindable` type
pub(crate) trait NestedRecord<T>: Send + Sync {
    fn validate(&self, engine: &Engine, data: &RawData) -> BindResult<()>;

    fn bind(&self, engine: &Engine, target: &mut T, data: &RawData) -> BindResult<()>;
}

struct Embedded<T, U> {
    accessor: fn(&mut T) -> &mut U,
    _marker: PhantomData<fn() -> U>,
}

impl<T: 'static, U: Bindable> NestedRecord<T> for Embedded<T, U> {
    fn validate(&self, engine: &Engine, data: &RawData) -> BindResult<()> {
        engine.check_rules(U::schema(), data)
    }

    fn bind(&self, engine: &Engine, target: &mut T, data: &RawData) -> BindResult<()> {
        engine.init_data(U::schema(), (self.accessor)(target), data)
    }
}
