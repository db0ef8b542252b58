//! Name-keyed registries for rules and converters
//!
//! Registration overwrites silently so callers can swap built-ins for test
//! doubles or their own implementations. There is no removal.

use crate::errors::{BindError, BindResult};
use std::collections::HashMap;

/// Mapping from a non-empty name to an implementation
#[derive(Clone)]
pub struct Registry<V> {
    /// What the entries are, for error messages and logs ("rule", "converter")
    label: &'static str,
    entries: HashMap<String, V>,
}

impl<V> Registry<V> {
    /// Create an empty registry
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            entries: HashMap::new(),
        }
    }

    /// Insert or overwrite an entry
    ///
    /// Fails with [`BindError::InvalidArgument`] when `name` is empty.
    pub fn register(&mut self, name: &str, value: V) -> BindResult<()> {
        if name.is_empty() {
            return Err(BindError::InvalidArgument(format!(
                "empty {} name provided",
                self.label
            )));
        }

        if self.entries.insert(name.to_string(), value).is_some() {
            tracing::debug!(kind = self.label, name, "Overwrote registered entry");
        } else {
            tracing::trace!(kind = self.label, name, "Registered entry");
        }
        Ok(())
    }

    /// Bulk insert entries with statically known, non-empty names
    pub(crate) fn seed(&mut self, entries: impl IntoIterator<Item = (&'static str, V)>) {
        for (name, value) in entries {
            self.entries.insert(name.to_string(), value);
        }
        tracing::trace!(kind = self.label, count = self.entries.len(), "Seeded built-in entries");
    }

    /// Look up an entry by name
    pub fn lookup(&self, name: &str) -> Option<&V> {
        self.entries.get(name)
    }

    /// Check whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<V> std::fmt::Debug for Registry<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("label", &self.label)
            .field("names", &self.names())
            .finish()
    }
}
