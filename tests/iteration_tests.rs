//! Integration tests for the collection iteration engine
//!
//! Exercises each/map/reduce/filter/reject/every/some/contains over
//! sequences, ordered maps and JSON documents.

use serde_json::{json, Value};
use std::collections::BTreeMap;
use underbar::{
    contains, each, every, every_truthy, filter, fold, map, reduce, reject, some, some_truthy,
    Collection, ErrorCode, Key, UnderbarError,
};

fn stooges() -> BTreeMap<String, i32> {
    let mut map = BTreeMap::new();
    map.insert("curly".to_string(), 60);
    map.insert("larry".to_string(), 50);
    map.insert("moe".to_string(), 40);
    map
}

#[test]
fn test_each_over_sequence_visits_indices_in_order() {
    let letters = vec!["a", "b", "c"];
    let mut seen = Vec::new();
    each(&letters, |value, key, collection| {
        assert_eq!(collection.len(), 3);
        seen.push((key.as_index(), *value));
    });
    assert_eq!(seen, vec![(Some(0), "a"), (Some(1), "b"), (Some(2), "c")]);
}

#[test]
fn test_each_over_mapping_visits_every_key_once() {
    let ages = stooges();
    let mut seen = Vec::new();
    each(&ages, |value, key, _| {
        if let Key::Name(name) = key {
            seen.push((name.clone(), *value));
        }
    });
    assert_eq!(
        seen,
        vec![
            ("curly".to_string(), 60),
            ("larry".to_string(), 50),
            ("moe".to_string(), 40)
        ]
    );
}

#[test]
fn test_each_on_empty_never_calls_iterator() {
    let empty: Vec<i32> = Vec::new();
    let mut calls = 0;
    each(&empty, |_, _, _| calls += 1);
    assert_eq!(calls, 0);
}

#[test]
fn test_map_preserves_length_and_order() {
    let numbers = vec![1, 2, 3];
    assert_eq!(map(&numbers, |n| n * 2), vec![2, 4, 6]);
    assert_eq!(map(&numbers, |n| n.to_string()), vec!["1", "2", "3"]);
    assert!(map(&Vec::<i32>::new(), |n| n + 1).is_empty());
}

#[test]
fn test_reduce_with_accumulator() {
    let total = reduce(&[1, 2, 3], |total: i32, n: &i32| total + n, Some(0)).unwrap();
    assert_eq!(total, 6);
}

#[test]
fn test_reduce_seeds_with_first_element() {
    let calls = std::cell::Cell::new(0);
    let result = reduce(
        &[5],
        |total: i32, n: &i32| {
            calls.set(calls.get() + 1);
            total + n * n
        },
        None,
    )
    .unwrap();
    assert_eq!(result, 5);
    assert_eq!(calls.get(), 0);

    let result = reduce(&[2, 3, 4], |total: i32, n: &i32| total * n, None).unwrap();
    assert_eq!(result, 24);
}

#[test]
fn test_reduce_empty() {
    let empty: Vec<i32> = Vec::new();
    assert_eq!(reduce(&empty, |t: i32, n: &i32| t + n, Some(0)).unwrap(), 0);

    let err = reduce(&empty, |t: i32, n: &i32| t + n, None).unwrap_err();
    assert!(matches!(err, UnderbarError::EmptyCollection { .. }));
    assert_eq!(err.code(), ErrorCode::EMPTY_COLLECTION);
}

#[test]
fn test_reduce_over_mapping_values() {
    let total = reduce(&stooges(), |total: i32, age: &i32| total + age, Some(0)).unwrap();
    assert_eq!(total, 150);
}

#[test]
fn test_fold_builds_other_types() {
    let words = vec!["a", "bb", "ccc"];
    let joined = fold(
        &words,
        |mut acc: String, w: &&str| {
            acc.push_str(w);
            acc
        },
        String::new(),
    );
    assert_eq!(joined, "abbccc");
}

#[test]
fn test_filter_and_reject_partition() {
    let numbers: Vec<i32> = (1..=10).collect();
    let evens = filter(&numbers, |n| n % 2 == 0);
    let odds = reject(&numbers, |n| n % 2 == 0);
    assert_eq!(evens, vec![2, 4, 6, 8, 10]);
    assert_eq!(odds, vec![1, 3, 5, 7, 9]);
    assert_eq!(evens.len() + odds.len(), numbers.len());
    assert_eq!(numbers, (1..=10).collect::<Vec<_>>());
}

#[test]
fn test_filter_over_mapping_returns_values() {
    let old = filter(&stooges(), |age| *age >= 50);
    assert_eq!(old, vec![60, 50]);
}

#[test]
fn test_every_and_some() {
    let numbers = vec![2, 4, 6];
    assert!(every(&numbers, |n| n % 2 == 0));
    assert!(!some(&numbers, |n| n % 2 == 1));

    let empty: Vec<i32> = Vec::new();
    assert!(every(&empty, |_| false));
    assert!(!some(&empty, |_| true));
}

#[test]
fn test_truthiness_defaults() {
    assert!(every_truthy(&[1, 2, 3]));
    assert!(!every_truthy(&[1, 0, 3]));
    assert!(some_truthy(&["", "x"]));
    assert!(!some_truthy(&[None::<i32>, None]));
}

#[test]
fn test_every_truthy_over_json() {
    let doc = json!([1, "a", true, [], {}]);
    let collection = Collection::try_from(&doc).unwrap();
    assert!(every_truthy(collection));

    let doc = json!({"a": 0, "b": null});
    let collection = Collection::try_from(&doc).unwrap();
    assert!(!some_truthy(collection));
}

#[test]
fn test_contains() {
    assert!(contains(&[1, 2, 3], &3));
    assert!(!contains(&[1, 2, 3], &4));
    assert!(contains(&stooges(), &40));
    assert!(!contains(&Vec::<i32>::new(), &0));

    let doc = json!({"name": "moe"});
    let collection = Collection::try_from(&doc).unwrap();
    assert!(contains(collection, &Value::from("moe")));
}

#[test]
fn test_scalar_json_is_not_a_collection() {
    let doc = json!("not a collection");
    let err = Collection::try_from(&doc).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ARGUMENT_NOT_A_COLLECTION);
}
