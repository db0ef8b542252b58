//! Raw string data to bind from
//!
//! [`RawData`] is the flat string-keyed input of a binding pass: form fields,
//! query parameters, or any other `key -> value` source.

use std::borrow::Cow;
use std::collections::HashMap;

/// Flat mapping of data keys to raw string values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RawData {
    values: HashMap<String, String>,
}

impl RawData {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` string
    ///
    /// A leading `?` is ignored, `+` decodes to a space, and a pair without
    /// `=` maps to an empty value. Later duplicates overwrite earlier ones.
    ///
    /// # Example
    /// ```
    /// use ouroboros_binding::RawData;
    ///
    /// let data = RawData::from_query("?name=Jane+Doe&age=42&flag");
    /// assert_eq!(data.get("name"), Some("Jane Doe"));
    /// assert_eq!(data.get("age"), Some("42"));
    /// assert_eq!(data.get("flag"), Some(""));
    /// ```
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut data = Self::new();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            data.insert(decode_component(key), decode_component(value));
        }

        data
    }

    /// Build a map from a JSON object of scalar values
    ///
    /// Strings are taken as-is; numbers and booleans use their JSON text.
    /// Nulls are skipped, so they behave like absent keys.
    #[cfg(feature = "serde")]
    pub fn from_json_object(value: &serde_json::Value) -> crate::BindResult<Self> {
        use serde_json::Value as Json;

        let Json::Object(map) = value else {
            return Err(crate::BindError::InvalidArgument(
                "expected a JSON object".to_string(),
            ));
        };

        let mut data = Self::new();
        for (key, value) in map {
            match value {
                Json::Null => {}
                Json::String(s) => data.insert(key.clone(), s.clone()),
                Json::Number(n) => data.insert(key.clone(), n.to_string()),
                Json::Bool(b) => data.insert(key.clone(), b.to_string()),
                Json::Array(_) | Json::Object(_) => {
                    return Err(crate::BindError::InvalidArgument(format!(
                        "key '{}' holds a non-scalar JSON value",
                        key
                    )));
                }
            }
        }
        Ok(data)
    }

    /// Insert or overwrite a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get the raw value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no entries
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(key, value)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<HashMap<String, String>> for RawData {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K, V> FromIterator<(K, V)> for RawData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for RawData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Decode one query component, falling back to the raw text on bad escapes
fn decode_component(s: &str) -> String {
    if !s.contains('+') && !s.contains('%') {
        return s.to_string();
    }

    let with_spaces: Cow<'_, str> = if s.contains('+') {
        Cow::Owned(s.replace('+', " "))
    } else {
        Cow::Borrowed(s)
    };

    match urlencoding::decode(&with_spaces) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => with_spaces.into_owned(),
    }
}
