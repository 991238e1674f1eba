//! Iteration and reduction over sequences and mappings
//!
//! Every function accepts anything convertible into a [`Collection`]:
//! slices, vectors, arrays, ordered and hashed maps, JSON objects. Values are
//! handed to iterators by reference with the collection's lifetime, so an
//! iterator may return a borrow of its argument.

use super::accessors::identity;
use super::collection::{Collection, Key};
use super::truthy::Truthy;
use crate::error::{Result, UnderbarError};

/// Call `iterator(value, key, collection)` once per element, in order
pub fn each<'a, V, K, C, F>(collection: C, mut iterator: F)
where
    V: 'a,
    K: 'a,
    C: Into<Collection<'a, V, K>>,
    F: FnMut(&'a V, Key<'a, K>, &Collection<'a, V, K>),
{
    let collection = collection.into();
    for (key, value) in collection.entries() {
        iterator(value, key, &collection);
    }
}

/// Apply `iterator` to each element of a sequence, collecting the results
pub fn map<'a, T, U, F>(sequence: &'a [T], mut iterator: F) -> Vec<U>
where
    F: FnMut(&'a T) -> U,
{
    let mut result = Vec::with_capacity(sequence.len());
    each(sequence, |value, _, _| result.push(iterator(value)));
    result
}

/// Fold a collection into a single value
///
/// With `Some(accumulator)` the iterator sees every element. With `None` the
/// first element seeds the accumulator and is never passed to the iterator,
/// so a single-element collection returns that element untouched. An empty
/// collection with no accumulator has no starting value and fails with
/// [`UnderbarError::EmptyCollection`].
pub fn reduce<'a, V, K, A, C, F>(collection: C, iterator: F, accumulator: Option<A>) -> Result<A>
where
    V: Clone + Into<A> + 'a,
    K: 'a,
    C: Into<Collection<'a, V, K>>,
    F: FnMut(A, &'a V) -> A,
{
    let collection = collection.into();
    let mut values = collection.values();
    let seed = match accumulator {
        Some(accumulator) => accumulator,
        None => values
            .next()
            .ok_or_else(UnderbarError::empty_collection)?
            .clone()
            .into(),
    };
    Ok(values.fold(seed, iterator))
}

/// [`reduce`] with a mandatory accumulator of any type; never fails
pub fn fold<'a, V, K, A, C, F>(collection: C, iterator: F, accumulator: A) -> A
where
    V: 'a,
    K: 'a,
    C: Into<Collection<'a, V, K>>,
    F: FnMut(A, &'a V) -> A,
{
    let collection = collection.into();
    let result = collection.values().fold(accumulator, iterator);
    result
}

/// Elements for which `test` is truthy, in input order
pub fn filter<'a, V, K, C, F, B>(collection: C, mut test: F) -> Vec<V>
where
    V: Clone + 'a,
    K: 'a,
    C: Into<Collection<'a, V, K>>,
    F: FnMut(&'a V) -> B,
    B: Truthy,
{
    let mut output = Vec::new();
    each(collection, |value, _, _| {
        if test(value).is_truthy() {
            output.push(value.clone());
        }
    });
    output
}

/// Elements for which `test` is falsy, in input order
pub fn reject<'a, V, K, C, F, B>(collection: C, mut test: F) -> Vec<V>
where
    V: Clone + 'a,
    K: 'a,
    C: Into<Collection<'a, V, K>>,
    F: FnMut(&'a V) -> B,
    B: Truthy,
{
    filter(collection, |value| !test(value).is_truthy())
}

/// Whether `iterator` is truthy for every element (true for empty input)
pub fn every<'a, V, K, C, F, B>(collection: C, mut iterator: F) -> bool
where
    V: 'a,
    K: 'a,
    C: Into<Collection<'a, V, K>>,
    F: FnMut(&'a V) -> B,
    B: Truthy,
{
    let collection = collection.into();
    let result = collection
        .values()
        .all(|value| iterator(value).is_truthy());
    result
}

/// Whether `iterator` is truthy for at least one element (false for empty input)
pub fn some<'a, V, K, C, F, B>(collection: C, mut iterator: F) -> bool
where
    V: 'a,
    K: 'a,
    C: Into<Collection<'a, V, K>>,
    F: FnMut(&'a V) -> B,
    B: Truthy,
{
    let collection = collection.into();
    let result = collection
        .values()
        .any(|value| iterator(value).is_truthy());
    result
}

/// [`every`] with the identity iterator
pub fn every_truthy<'a, V, K, C>(collection: C) -> bool
where
    V: Truthy + 'a,
    K: 'a,
    C: Into<Collection<'a, V, K>>,
{
    every(collection, identity::<&V>)
}

/// [`some`] with the identity iterator
pub fn some_truthy<'a, V, K, C>(collection: C) -> bool
where
    V: Truthy + 'a,
    K: 'a,
    C: Into<Collection<'a, V, K>>,
{
    some(collection, identity::<&V>)
}

/// Whether any element equals `target`
pub fn contains<'a, V, K, C>(collection: C, target: &V) -> bool
where
    V: PartialEq + 'a,
    K: 'a,
    C: Into<Collection<'a, V, K>>,
{
    some(collection, |item| item == target)
}
