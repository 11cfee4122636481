//! A single named block of key/value entries.

use std::collections::BTreeMap;

/// Key/value entries of one section.
///
/// Keys compare exactly. Inserting an existing key replaces its value, which
/// is how later duplicate lines in a file win over earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    entries: BTreeMap<String, String>,
}

impl Section {
    pub(crate) const EMPTY: Section = Section {
        entries: BTreeMap::new(),
    };

    /// Creates an empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`, or `None` if the key was never set.
    ///
    /// An empty string is a legal value and is returned as `Some("")`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the value for `key`, or an empty string when absent.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Sets `key` to `value`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Section {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut section = Section::new();
        for (key, value) in iter {
            section.insert(key, value);
        }
        section
    }
}
