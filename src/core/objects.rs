//! Merging helpers for keyed objects

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Copy every entry of each source into `target`, later sources winning
pub fn extend<'t, K, V>(
    target: &'t mut BTreeMap<K, V>,
    sources: &[&BTreeMap<K, V>],
) -> &'t mut BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    for source in sources {
        for (key, value) in source.iter() {
            target.insert(key.clone(), value.clone());
        }
    }
    target
}

/// Like [`extend`], but never overwrites a key `target` already has
pub fn defaults<'t, K, V>(
    target: &'t mut BTreeMap<K, V>,
    sources: &[&BTreeMap<K, V>],
) -> &'t mut BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    for source in sources {
        for (key, value) in source.iter() {
            target
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
    target
}

/// [`extend`] for JSON objects
pub fn extend_object<'t>(
    target: &'t mut Map<String, Value>,
    sources: &[&Map<String, Value>],
) -> &'t mut Map<String, Value> {
    for source in sources {
        for (key, value) in source.iter() {
            target.insert(key.clone(), value.clone());
        }
    }
    target
}

/// [`defaults`] for JSON objects
///
/// A key holding JSON `null` counts as present and is left alone.
pub fn defaults_object<'t>(
    target: &'t mut Map<String, Value>,
    sources: &[&Map<String, Value>],
) -> &'t mut Map<String, Value> {
    for source in sources {
        for (key, value) in source.iter() {
            if !target.contains_key(key) {
                target.insert(key.clone(), value.clone());
            }
        }
    }
    target
}
