//! Small accessors the rest of the core leans on

use super::collection::Collection;
use super::iteration::{each, map};
use super::ordering::Record;
use serde_json::Value;

/// Returns its argument unchanged; the default iterator
pub fn identity<T>(value: T) -> T {
    value
}

/// The first element, if any
pub fn first<T>(array: &[T]) -> Option<&T> {
    array.first()
}

/// The first `n` elements (all of them when `n` exceeds the length)
pub fn first_n<T>(array: &[T], n: usize) -> &[T] {
    &array[..n.min(array.len())]
}

/// The last element, if any
pub fn last<T>(array: &[T]) -> Option<&T> {
    array.last()
}

/// The last `n` elements (all of them when `n` exceeds the length)
pub fn last_n<T>(array: &[T], n: usize) -> &[T] {
    &array[array.len().saturating_sub(n)..]
}

/// Index of the first element equal to `target`
pub fn index_of<T: PartialEq>(array: &[T], target: &T) -> Option<usize> {
    let mut result = None;
    each(array, |item, key, _| {
        if result.is_none() && item == target {
            result = key.as_index();
        }
    });
    result
}

/// Project the named property out of every record
pub fn pluck<T: Record>(array: &[T], name: &str) -> Vec<Option<Value>> {
    map(array, |item| item.field(name))
}

/// Project the named property out of every value of a collection
pub fn pluck_values<'a, V, K, C>(collection: C, name: &str) -> Vec<Option<Value>>
where
    V: Record + 'a,
    K: 'a,
    C: Into<Collection<'a, V, K>>,
{
    let collection = collection.into();
    let result = collection.values().map(|item| item.field(name)).collect();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_and_last() {
        let items = [1, 2, 3];
        assert_eq!(first(&items), Some(&1));
        assert_eq!(last(&items), Some(&3));
        assert_eq!(first_n(&items, 2), &[1, 2]);
        assert_eq!(last_n(&items, 2), &[2, 3]);
        assert_eq!(last_n(&items, 5), &[1, 2, 3]);
        assert_eq!(first(&[] as &[i32]), None);
    }

    #[test]
    fn test_index_of_finds_first_match() {
        let items = [4, 7, 4];
        assert_eq!(index_of(&items, &4), Some(0));
        assert_eq!(index_of(&items, &7), Some(1));
        assert_eq!(index_of(&items, &9), None);
    }

    #[test]
    fn test_pluck() {
        let people = vec![json!({"name": "moe", "age": 30}), json!({"name": "curly"})];
        assert_eq!(
            pluck(&people, "age"),
            vec![Some(json!(30)), None]
        );
    }
}
