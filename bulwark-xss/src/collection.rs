//! Ordered multi-valued maps and their sanitization.

use crate::sanitizer::{DEFAULT_SANITIZER, XssSanitizer};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered map from name to one or more values.
///
/// Names keep first-insertion order and each name keeps its values in
/// insertion order, duplicates included. Request parameters, headers and
/// form fields all fit this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiMap {
    entries: Vec<(String, Vec<String>)>,
}

impl MultiMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` string.
    pub fn from_query(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
        Ok(pairs.into_iter().collect())
    }

    /// Append a value under `name`.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => self.entries[idx].1.push(value),
            None => self.entries.push((name, vec![value])),
        }
        self
    }

    /// Replace all values under `name`, keeping its position if present.
    pub fn set(&mut self, name: impl Into<String>, values: Vec<String>) -> &mut Self {
        let name = name.into();
        match self.position(&name) {
            Some(idx) => self.entries[idx].1 = values,
            None => self.entries.push((name, values)),
        }
        self
    }

    /// Remove `name`, returning its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        let idx = self.position(name)?;
        Some(self.entries.remove(idx).1)
    }

    /// First value under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    /// All values under `name`, empty if absent.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.position(name)
            .map(|idx| self.entries[idx].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }
}

impl<K, V> FromIterator<(K, V)> for MultiMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = MultiMap::new();
        for (name, value) in iter {
            map.add(name, value);
        }
        map
    }
}

impl Serialize for MultiMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, values) in &self.entries {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

impl XssSanitizer {
    /// Sanitize every value of `values`, preserving names, order and
    /// multiplicity.
    pub fn sanitize_all(&self, values: &MultiMap) -> MultiMap {
        let entries = values
            .entries
            .iter()
            .map(|(name, list)| {
                let clean = list.iter().map(|v| self.sanitize_str(v)).collect();
                (name.clone(), clean)
            })
            .collect();
        MultiMap { entries }
    }

    /// In-place variant of [`sanitize_all`](Self::sanitize_all).
    pub fn sanitize_all_in_place(&self, values: &mut MultiMap) {
        for (_name, list) in values.entries.iter_mut() {
            for value in list.iter_mut() {
                *value = self.sanitize_str(value);
            }
        }
    }
}

/// Sanitize every value of `values` with the default sanitizer.
pub fn sanitize_all(values: &MultiMap) -> MultiMap {
    DEFAULT_SANITIZER.sanitize_all(values)
}

/// Sanitize every value of `values` in place with the default sanitizer.
pub fn sanitize_all_in_place(values: &mut MultiMap) {
    DEFAULT_SANITIZER.sanitize_all_in_place(values)
}
