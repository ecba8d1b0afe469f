//! Ordered property view for nodes.
//!
//! A node may repeat a property key; the tree keeps every occurrence in
//! source order. [`PropertyMap`] is the consumer view that resolves those
//! duplicates: the last occurrence wins, and keys iterate in the order they
//! first appeared. It wraps an [`IndexMap`] so that order is deterministic.
//!
//! ## Examples
//!
//! ```rust
//! use kdl_parse::parse;
//!
//! let doc = parse("node b=1 a=2 b=3\n").unwrap();
//! let map = doc.nodes()[0].property_map();
//!
//! assert_eq!(map.len(), 2);
//! let keys: Vec<_> = map.keys().collect();
//! assert_eq!(keys, vec!["b", "a"]);
//! assert_eq!(map.get("b").and_then(|v| v.as_number()).and_then(|n| n.as_i64()), Some(3));
//! ```

use crate::value::Value;
use indexmap::IndexMap;
use std::borrow::Cow;

/// Property keys mapped to their effective values, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMap<'a>(IndexMap<Cow<'a, str>, &'a Value>);

impl<'a> PropertyMap<'a> {
    #[must_use]
    pub fn new() -> Self {
        PropertyMap(IndexMap::new())
    }

    /// Inserts a property, replacing the value of an existing key without
    /// moving it.
    ///
    /// Returns the value that was replaced.
    pub fn insert(&mut self, key: Cow<'a, str>, value: &'a Value) -> Option<&'a Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.get(key).copied()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in first-appearance order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|key| &**key)
    }

    /// Key-value pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'a Value)> {
        self.0.iter().map(|(key, value)| (&**key, *value))
    }
}

impl<'a> FromIterator<(Cow<'a, str>, &'a Value)> for PropertyMap<'a> {
    fn from_iter<T: IntoIterator<Item = (Cow<'a, str>, &'a Value)>>(iter: T) -> Self {
        let mut map = PropertyMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<'a> IntoIterator for PropertyMap<'a> {
    type Item = (Cow<'a, str>, &'a Value);
    type IntoIter = indexmap::map::IntoIter<Cow<'a, str>, &'a Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Keyword, ValueKind};

    #[test]
    fn test_replace_keeps_position() {
        let one = Value::new(None, ValueKind::Keyword(Keyword::True));
        let two = Value::new(None, ValueKind::Keyword(Keyword::False));
        let mut map = PropertyMap::new();
        assert!(map.insert("x".into(), &one).is_none());
        map.insert("y".into(), &one);
        assert_eq!(map.insert("x".into(), &two), Some(&one));

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![("x", &two), ("y", &one)]);
        assert!(map.contains_key("y"));
        assert!(!map.is_empty());
    }
}
