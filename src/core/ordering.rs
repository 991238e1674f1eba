//! Stable ordering by a derived key
//!
//! Sorting decorates each element with its key and original position, sorts
//! on `(key, position)` and strips the decoration. Equal keys therefore keep
//! their input order no matter which sort algorithm runs underneath.

use super::collection::Collection;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Elements that expose named properties, for sorting and plucking by name
pub trait Record {
    /// Value of the named property, `None` when absent
    fn field(&self, name: &str) -> Option<Value>;
}

impl Record for Value {
    /// Supports dot-separated paths (`"owner.name"`, `"items.0"`)
    fn field(&self, name: &str) -> Option<Value> {
        get_field(self, name).cloned()
    }
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        let (head, rest) = match name.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (name, None),
        };
        let value = self.get(head)?;
        match rest {
            Some(path) => get_field(value, path).cloned(),
            None => Some(value.clone()),
        }
    }
}

impl Record for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// Walk a dot-separated path through nested objects and arrays
pub fn get_field<'a>(item: &'a Value, field_path: &str) -> Option<&'a Value> {
    let mut current = item;
    for part in field_path.split('.') {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over JSON values
///
/// Numbers compare numerically, strings lexicographically, booleans
/// `false < true`, arrays element by element. Objects are all equal to each
/// other. Values of different types order by type:
/// null < bool < number < string < array < object.
pub fn compare_json(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x.cmp(&y)
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x.cmp(&y)
            } else {
                let x = x.as_f64().unwrap_or(0.0);
                let y = y.as_f64().unwrap_or(0.0);
                x.total_cmp(&y)
            }
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y.iter())
            .map(|(x, y)| compare_json(x, y))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// `partial_cmp` made total: values incomparable with themselves (NaN) sort
/// after everything else and tie with each other.
fn compare_partial<P: PartialOrd>(a: &P, b: &P) -> Ordering {
    match a.partial_cmp(b) {
        Some(ordering) => ordering,
        None => {
            let a_ordered = a.partial_cmp(a).is_some();
            let b_ordered = b.partial_cmp(b).is_some();
            match (a_ordered, b_ordered) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => Ordering::Equal,
            }
        }
    }
}

fn compare_fields(a: &Option<Value>, b: &Option<Value>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => compare_json(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn sort_with<'a, V, K, C, P, F, O>(collection: C, mut project: F, mut compare: O) -> Vec<V>
where
    V: Clone + 'a,
    K: 'a,
    C: Into<Collection<'a, V, K>>,
    F: FnMut(&'a V) -> P,
    O: FnMut(&P, &P) -> Ordering,
{
    let collection = collection.into();
    let mut decorated: Vec<(P, usize, &'a V)> = collection
        .values()
        .enumerate()
        .map(|(position, value)| (project(value), position, value))
        .collect();
    decorated.sort_unstable_by(|a, b| compare(&a.0, &b.0).then(a.1.cmp(&b.1)));
    decorated
        .into_iter()
        .map(|(_, _, value)| value.clone())
        .collect()
}

/// Values sorted ascending by `criterion(value)`, stable on ties
pub fn sort_by<'a, V, K, C, P, F>(collection: C, criterion: F) -> Vec<V>
where
    V: Clone + 'a,
    K: 'a,
    C: Into<Collection<'a, V, K>>,
    F: FnMut(&'a V) -> P,
    P: PartialOrd,
{
    sort_with(collection, criterion, compare_partial::<P>)
}

/// Values sorted ascending by a named property, stable on ties
///
/// Elements missing the property sort last.
pub fn sort_by_property<'a, V, K, C>(collection: C, name: &str) -> Vec<V>
where
    V: Record + Clone + 'a,
    K: 'a,
    C: Into<Collection<'a, V, K>>,
{
    sort_with(collection, |value| value.field(name), compare_fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_by_projection() {
        let words = vec!["ccc", "a", "bb"];
        assert_eq!(sort_by(&words, |w| w.len()), vec!["a", "bb", "ccc"]);
    }

    #[test]
    fn test_sort_by_is_stable() {
        let pairs = vec![(1, 'x'), (0, 'y'), (1, 'z'), (0, 'w')];
        let sorted = sort_by(&pairs, |pair| pair.0);
        assert_eq!(sorted, vec![(0, 'y'), (0, 'w'), (1, 'x'), (1, 'z')]);
    }

    #[test]
    fn test_nan_sorts_last() {
        let values = vec![2.0, f64::NAN, 1.0];
        let sorted = sort_by(&values, |v| *v);
        assert_eq!(sorted[0], 1.0);
        assert_eq!(sorted[1], 2.0);
        assert!(sorted[2].is_nan());
    }

    #[test]
    fn test_sort_by_property_on_json() {
        let people = vec![
            json!({"name": "curly", "age": 60}),
            json!({"name": "moe", "age": 40}),
            json!({"name": "larry"}),
        ];
        let sorted = sort_by_property(&people, "age");
        let names: Vec<_> = sorted.iter().map(|p| p["name"].clone()).collect();
        assert_eq!(names, vec![json!("moe"), json!("curly"), json!("larry")]);
    }

    #[test]
    fn test_get_field_paths() {
        let value = json!({"owner": {"name": "moe"}, "items": [10, 20]});
        assert_eq!(get_field(&value, "owner.name"), Some(&json!("moe")));
        assert_eq!(get_field(&value, "items.1"), Some(&json!(20)));
        assert_eq!(get_field(&value, "items.9"), None);
        assert_eq!(get_field(&value, "owner.name.first"), None);
    }

    #[test]
    fn test_compare_json_orders_types() {
        assert_eq!(compare_json(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare_json(&json!(1.5), &json!(1)), Ordering::Greater);
        assert_eq!(compare_json(&json!("b"), &json!("a")), Ordering::Greater);
        assert_eq!(compare_json(&json!(null), &json!(false)), Ordering::Less);
        assert_eq!(compare_json(&json!(99), &json!("1")), Ordering::Less);
        assert_eq!(compare_json(&json!([1, 2]), &json!([1, 3])), Ordering::Less);
        assert_eq!(compare_json(&json!([1]), &json!([1, 0])), Ordering::Less);
    }
}
