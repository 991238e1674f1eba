//! Structural transforms over one or more sequences
//!
//! Equality is the element type's `PartialEq`; nothing here hashes, so
//! floats and JSON values work as elements and keys.

use super::accessors::identity;
use super::iteration::{contains, each, filter};
use serde_json::Value;

/// Remove duplicates, keeping the first occurrence of each element
///
/// See [`uniq_by`] for the meaning of `is_sorted`.
pub fn uniq<T>(array: &[T], is_sorted: bool) -> Vec<T>
where
    T: PartialEq + Clone,
{
    uniq_by(array, is_sorted, identity::<&T>)
}

/// Remove elements whose key duplicates an earlier element's key
///
/// With `is_sorted` each key is only compared with the previous kept key,
/// which is correct when `array` is already sorted by that key. Asserting it
/// for unsorted input leaves non-adjacent duplicates in place.
pub fn uniq_by<'a, T, K, F>(array: &'a [T], is_sorted: bool, mut iterator: F) -> Vec<T>
where
    T: Clone,
    K: PartialEq,
    F: FnMut(&'a T) -> K,
{
    let mut output = Vec::new();
    if is_sorted {
        let mut previous: Option<K> = None;
        for item in array {
            let key = iterator(item);
            if previous.as_ref() != Some(&key) {
                output.push(item.clone());
                previous = Some(key);
            }
        }
    } else {
        let mut seen: Vec<K> = Vec::new();
        for item in array {
            let key = iterator(item);
            if !contains(&seen, &key) {
                seen.push(key);
                output.push(item.clone());
            }
        }
    }
    output
}

/// One step of a nested structure: either a sub-list or a leaf
pub enum Node<'a, N: Nestable> {
    List(&'a [N]),
    Leaf(&'a N::Leaf),
}

/// Types that may contain lists of themselves
pub trait Nestable: Sized {
    type Leaf;

    fn node(&self) -> Node<'_, Self>;
}

/// An explicitly nested list of `T`
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<T> {
    Item(T),
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    pub fn list(items: impl IntoIterator<Item = Nested<T>>) -> Self {
        Nested::List(items.into_iter().collect())
    }
}

impl<T> From<T> for Nested<T> {
    fn from(item: T) -> Self {
        Nested::Item(item)
    }
}

impl<T> Nestable for Nested<T> {
    type Leaf = T;

    fn node(&self) -> Node<'_, Self> {
        match self {
            Nested::Item(item) => Node::Leaf(item),
            Nested::List(items) => Node::List(items),
        }
    }
}

impl Nestable for Value {
    type Leaf = Value;

    fn node(&self) -> Node<'_, Self> {
        match self {
            Value::Array(items) => Node::List(items),
            other => Node::Leaf(other),
        }
    }
}

/// Flatten arbitrarily deep nesting into one list, depth-first, left to right
///
/// Uses an explicit stack, so depth is bounded by memory rather than the
/// call stack.
pub fn flatten<N>(nested: &[N]) -> Vec<N::Leaf>
where
    N: Nestable,
    N::Leaf: Clone,
{
    let mut result = Vec::new();
    let mut stack = vec![nested.iter()];
    while let Some(top) = stack.last_mut() {
        match top.next() {
            None => {
                stack.pop();
            }
            Some(element) => match element.node() {
                Node::List(children) => stack.push(children.iter()),
                Node::Leaf(leaf) => result.push(leaf.clone()),
            },
        }
    }
    result
}

/// Distinct elements of the first array that appear in every array
///
/// Output follows the first array's order. No arrays yields an empty result.
pub fn intersection<T, A>(arrays: &[A]) -> Vec<T>
where
    T: PartialEq + Clone,
    A: AsRef<[T]>,
{
    let Some((first, rest)) = arrays.split_first() else {
        return Vec::new();
    };
    let candidates = uniq(first.as_ref(), false);
    filter(&candidates, |item| {
        rest.iter().all(|other| contains(other.as_ref(), item))
    })
}

/// Elements of `array` found in none of `others`
///
/// This only filters: duplicates within `array` are kept.
pub fn difference<T, A>(array: &[T], others: &[A]) -> Vec<T>
where
    T: PartialEq + Clone,
    A: AsRef<[T]>,
{
    filter(array, |item| {
        !others.iter().any(|other| contains(other.as_ref(), item))
    })
}

/// Group the i-th elements of every array together
///
/// The result is as long as the longest input; positions past the end of a
/// shorter input are `None`.
pub fn zip<T, A>(arrays: &[A]) -> Vec<Vec<Option<T>>>
where
    T: Clone,
    A: AsRef<[T]>,
{
    let length = arrays
        .iter()
        .map(|array| array.as_ref().len())
        .max()
        .unwrap_or(0);
    let mut result = Vec::with_capacity(length);
    for index in 0..length {
        let mut tuple = Vec::with_capacity(arrays.len());
        each(arrays, |array, _, _| {
            tuple.push(array.as_ref().get(index).cloned());
        });
        result.push(tuple);
    }
    result
}

/// [`zip`] for two sequences of different element types
pub fn zip2<A, B>(left: &[A], right: &[B]) -> Vec<(Option<A>, Option<B>)>
where
    A: Clone,
    B: Clone,
{
    let length = left.len().max(right.len());
    (0..length)
        .map(|index| (left.get(index).cloned(), right.get(index).cloned()))
        .collect()
}
