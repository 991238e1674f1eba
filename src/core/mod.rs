//! Core collection algorithms as pure functions
//!
//! Following the "functional core, imperative shell" pattern, all functions here:
//! - Take inputs and return new outputs, never mutating their inputs
//! - Have no side effects beyond calling the iterators they are given
//! - Run synchronously to completion
//! - Are easily testable without mocks
//!
//! `shuffle` is the one exception to determinism: it draws from an RNG,
//! which callers may seed through `shuffle_with`.

pub mod accessors;
pub mod collection;
pub mod dispatch;
pub mod iteration;
pub mod objects;
pub mod ordering;
pub mod random;
pub mod set_algebra;
pub mod truthy;

pub use accessors::{first, first_n, identity, index_of, last, last_n, pluck, pluck_values};
pub use collection::{Collection, Entries, Key};
pub use dispatch::{invoke, Callee, Lookup, Method, Methods};
pub use iteration::{
    contains, each, every, every_truthy, filter, fold, map, reduce, reject, some, some_truthy,
};
pub use objects::{defaults, defaults_object, extend, extend_object};
pub use ordering::{compare_json, get_field, sort_by, sort_by_property, Record};
pub use random::{shuffle, shuffle_in_place, shuffle_with};
pub use set_algebra::{
    difference, flatten, intersection, uniq, uniq_by, zip, zip2, Nestable, Nested, Node,
};
pub use truthy::Truthy;
