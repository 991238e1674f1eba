//! Per-element dispatch of a named or direct operation
//!
//! Elements publish their callable operations through [`Methods`], a
//! lookup-by-name returning a plain function pointer. [`invoke`] resolves a
//! [`Callee`] against every element and calls it with the element as
//! receiver.

use super::collection::Collection;
use crate::error::{Result, UnderbarError};
use tracing::debug;

/// An operation callable on a receiver of type `T` with arguments `A`
pub type Method<T, A, O> = fn(&T, &A) -> O;

/// Looks up the operation called `name` on a receiver
pub type Lookup<T, A, O> = fn(&T, &str) -> Option<Method<T, A, O>>;

/// Name-based lookup of an element's operations
pub trait Methods<A: ?Sized = ()> {
    type Output;

    /// The operation called `name`, if this element has one
    fn method(&self, name: &str) -> Option<Method<Self, A, Self::Output>>;
}

/// What [`invoke`] calls on each element
pub enum Callee<'f, T, A: ?Sized, O> {
    /// Resolve the operation by name on each element
    Named(&'f str, Lookup<T, A, O>),
    /// Call this function with each element as receiver
    Direct(&'f dyn Fn(&T, &A) -> O),
}

impl<'f, T, A: ?Sized, O> Callee<'f, T, A, O> {
    /// Call the operation `name` from each element's [`Methods`] table
    pub fn named(name: &'f str) -> Self
    where
        T: Methods<A, Output = O>,
    {
        Callee::Named(name, <T as Methods<A>>::method)
    }
}

/// Call `callee` on every element with `args`, collecting results in order
///
/// Named operations are resolved on every element before any is called, so
/// an element lacking the operation fails the whole call with
/// [`UnderbarError::Invocation`] and no operation runs.
pub fn invoke<'a, T, K, A, O, C>(
    collection: C,
    callee: Callee<'_, T, A, O>,
    args: &A,
) -> Result<Vec<O>>
where
    T: 'a,
    K: 'a,
    A: ?Sized,
    C: Into<Collection<'a, T, K>>,
{
    let collection = collection.into();
    match callee {
        Callee::Direct(function) => {
            let results = collection
                .values()
                .map(|element| function(element, args))
                .collect();
            Ok(results)
        }
        Callee::Named(name, lookup) => {
            let resolved = collection
                .values()
                .enumerate()
                .map(|(index, element)| match lookup(element, name) {
                    Some(method) => Ok((element, method)),
                    None => {
                        debug!("Element {} has no method '{}'", index, name);
                        Err(UnderbarError::method_not_found(name, index))
                    }
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(resolved
                .into_iter()
                .map(|(element, method)| method(element, args))
                .collect())
        }
    }
}

fn string_to_uppercase(s: &String, _: &()) -> String {
    s.to_uppercase()
}

fn string_to_lowercase(s: &String, _: &()) -> String {
    s.to_lowercase()
}

fn string_trim(s: &String, _: &()) -> String {
    s.trim().to_string()
}

fn string_reverse(s: &String, _: &()) -> String {
    s.chars().rev().collect()
}

impl Methods for String {
    type Output = String;

    fn method(&self, name: &str) -> Option<Method<Self, (), String>> {
        match name {
            "to_uppercase" => Some(string_to_uppercase),
            "to_lowercase" => Some(string_to_lowercase),
            "trim" => Some(string_trim),
            "reverse" => Some(string_reverse),
            _ => None,
        }
    }
}

fn vec_sort<T: Ord + Clone>(items: &Vec<T>, _: &()) -> Vec<T> {
    let mut sorted = items.clone();
    sorted.sort();
    sorted
}

fn vec_reverse<T: Clone>(items: &Vec<T>, _: &()) -> Vec<T> {
    items.iter().rev().cloned().collect()
}

fn vec_dedup<T: PartialEq + Clone>(items: &Vec<T>, _: &()) -> Vec<T> {
    let mut deduped = items.clone();
    deduped.dedup();
    deduped
}

impl<T: Ord + Clone> Methods for Vec<T> {
    type Output = Vec<T>;

    fn method(&self, name: &str) -> Option<Method<Self, (), Vec<T>>> {
        match name {
            "sort" => Some(vec_sort::<T>),
            "reverse" => Some(vec_reverse::<T>),
            "dedup" => Some(vec_dedup::<T>),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke_named_on_strings() {
        let words = vec!["dog".to_string(), "cat".to_string()];
        let upper = invoke(&words, Callee::named("to_uppercase"), &()).unwrap();
        assert_eq!(upper, vec!["DOG", "CAT"]);
    }

    #[test]
    fn test_invoke_named_on_vectors() {
        let lists = vec![vec![5, 1, 7], vec![3, 2, 1]];
        let sorted = invoke(&lists, Callee::named("sort"), &()).unwrap();
        assert_eq!(sorted, vec![vec![1, 5, 7], vec![1, 2, 3]]);
    }

    #[test]
    fn test_invoke_direct() {
        let words = vec!["dog".to_string(), "cat".to_string()];
        let exclaim = |s: &String, _: &()| format!("{}!", s);
        let result = invoke(&words, Callee::Direct(&exclaim), &()).unwrap();
        assert_eq!(result, vec!["dog!", "cat!"]);
    }

    #[test]
    fn test_invoke_direct_on_plain_values() {
        let numbers = vec![1i32, 2, 3];
        let describe = |n: &i32, suffix: &str| format!("{}{}", n * 2, suffix);
        let result = invoke(&numbers, Callee::Direct(&describe), "x").unwrap();
        assert_eq!(result, vec!["2x", "4x", "6x"]);
    }

    #[test]
    fn test_invoke_unknown_method_fails() {
        let words = vec!["dog".to_string()];
        let err = invoke(&words, Callee::named("bark"), &()).unwrap_err();
        assert!(matches!(
            err,
            UnderbarError::Invocation { ref method, index: 0, .. } if method == "bark"
        ));
    }
}
