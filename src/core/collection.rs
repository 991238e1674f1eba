//! Sequence / mapping abstraction shared by every traversal
//!
//! A [`Collection`] is either a borrowed slice or a snapshot of a map's
//! entries. Algorithms branch on the variant once and then walk a single
//! ordered stream of `(key, value)` pairs.

use crate::error::{ErrorCode, UnderbarError};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

/// A borrowed sequence or mapping
///
/// Mapping entries are captured in the source map's enumeration order when
/// the collection is built, so every traversal of the same `Collection`
/// visits the same keys in the same order, each exactly once.
#[derive(Debug, Clone)]
pub enum Collection<'a, V, K = String> {
    Sequence(&'a [V]),
    Mapping(Vec<(&'a K, &'a V)>),
}

/// Position of a value inside a [`Collection`]
#[derive(Debug, PartialEq, Eq)]
pub enum Key<'a, K> {
    Index(usize),
    Name(&'a K),
}

impl<K> Clone for Key<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Key<'_, K> {}

impl<'a, K> Key<'a, K> {
    /// Sequence index, if this key came from a sequence
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }

    /// Mapping key, if this key came from a mapping
    pub fn as_name(&self) -> Option<&'a K> {
        match self {
            Key::Index(_) => None,
            Key::Name(k) => Some(k),
        }
    }
}

impl<K: fmt::Display> fmt::Display for Key<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{}", i),
            Key::Name(k) => write!(f, "{}", k),
        }
    }
}

impl<'a, V, K> Collection<'a, V, K> {
    /// Build a mapping from any iterator of entries, keeping its order
    pub fn from_entries(entries: impl IntoIterator<Item = (&'a K, &'a V)>) -> Self {
        Collection::Mapping(entries.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        match self {
            Collection::Sequence(items) => items.len(),
            Collection::Mapping(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Collection::Sequence(_))
    }

    /// Ordered `(key, value)` pairs
    pub fn entries(&self) -> Entries<'_, 'a, V, K> {
        match self {
            Collection::Sequence(items) => Entries::Sequence(items.iter().enumerate()),
            Collection::Mapping(entries) => Entries::Mapping(entries.iter()),
        }
    }

    /// Ordered values
    pub fn values(&self) -> impl Iterator<Item = &'a V> + '_ {
        self.entries().map(|(_, value)| value)
    }
}

/// Iterator over the entries of a [`Collection`]
pub enum Entries<'c, 'a, V, K> {
    Sequence(std::iter::Enumerate<std::slice::Iter<'a, V>>),
    Mapping(std::slice::Iter<'c, (&'a K, &'a V)>),
}

impl<'a, V, K> Iterator for Entries<'_, 'a, V, K> {
    type Item = (Key<'a, K>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Entries::Sequence(iter) => iter.next().map(|(i, v)| (Key::Index(i), v)),
            Entries::Mapping(iter) => iter.next().map(|(k, v)| (Key::Name(*k), *v)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Entries::Sequence(iter) => iter.size_hint(),
            Entries::Mapping(iter) => iter.size_hint(),
        }
    }
}

impl<V, K> ExactSizeIterator for Entries<'_, '_, V, K> {}

impl<'a, V> From<&'a [V]> for Collection<'a, V> {
    fn from(items: &'a [V]) -> Self {
        Collection::Sequence(items)
    }
}

impl<'a, V> From<&'a Vec<V>> for Collection<'a, V> {
    fn from(items: &'a Vec<V>) -> Self {
        Collection::Sequence(items.as_slice())
    }
}

impl<'a, V, const N: usize> From<&'a [V; N]> for Collection<'a, V> {
    fn from(items: &'a [V; N]) -> Self {
        Collection::Sequence(items.as_slice())
    }
}

impl<'a, K, V> From<&'a BTreeMap<K, V>> for Collection<'a, V, K> {
    fn from(map: &'a BTreeMap<K, V>) -> Self {
        Collection::from_entries(map.iter())
    }
}

impl<'a, K, V, S: BuildHasher> From<&'a HashMap<K, V, S>> for Collection<'a, V, K> {
    fn from(map: &'a HashMap<K, V, S>) -> Self {
        Collection::from_entries(map.iter())
    }
}

impl<'a> From<&'a Map<String, Value>> for Collection<'a, Value> {
    fn from(map: &'a Map<String, Value>) -> Self {
        Collection::from_entries(map.iter())
    }
}

impl<'a> TryFrom<&'a Value> for Collection<'a, Value> {
    type Error = UnderbarError;

    /// JSON arrays become sequences and objects become mappings; scalars are
    /// rejected.
    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => Ok(Collection::Sequence(items.as_slice())),
            Value::Object(map) => Ok(Collection::from(map)),
            other => Err(UnderbarError::invalid_argument_with_code(
                ErrorCode::ARGUMENT_NOT_A_COLLECTION,
                format!("expected an array or object, got {}", json_type_name(other)),
                Some("collection".to_string()),
            )),
        }
    }
}

/// Name of a JSON value's type, for error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
