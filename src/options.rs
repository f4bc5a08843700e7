//! Formatter options and the layering rule that produces the effective set.
//!
//! Option names are defined entirely by the external formatter; this module
//! never validates or enumerates them. Layering is a shallow override: later
//! sources replace identically-named keys of earlier ones, nested values are
//! never merged.

use crate::constants::FILEPATH_OPTION;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// An open mapping of formatter option names to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatOptions(Map<String, Value>);

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    ///
    /// ```
    /// use prettier_pipe::FormatOptions;
    ///
    /// let options = FormatOptions::new().set("singleQuote", true).set("semi", false);
    /// assert_eq!(options.get_bool("singleQuote"), Some(true));
    /// assert_eq!(options.get_bool("semi"), Some(false));
    /// ```
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Overlays `other` on top of `self`, key by key.
    pub fn merge(&mut self, other: &FormatOptions) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// The file path hint, if set.
    pub fn filepath(&self) -> Option<&str> {
        self.get_str(FILEPATH_OPTION)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for FormatOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FormatOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Computes the options the formatter sees for one file.
///
/// Sources, lowest to highest precedence: the project-resolved config (may be
/// absent), the options given to the stage, then the file's own path under
/// `filepath`, which nothing can override.
pub fn effective_options(
    project: Option<&FormatOptions>,
    explicit: &FormatOptions,
    path: &Path,
) -> FormatOptions {
    let mut effective = project.cloned().unwrap_or_default();
    effective.merge(explicit);
    effective.insert(FILEPATH_OPTION, path.to_string_lossy().into_owned());
    effective
}
