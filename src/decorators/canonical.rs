//! Canonical cache keys for memoization
//!
//! Every encoding is prefixed with a type tag and every variable-length part
//! is length-prefixed or bracketed, so distinct argument values of the same
//! type always produce distinct keys. Floats encode by value: all NaNs share
//! one key and `-0.0` is kept apart from `0.0`.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Arguments that can be reduced to a deterministic string key
pub trait CanonicalKey {
    /// Append this value's encoding to `out`
    fn write_canonical(&self, out: &mut String);

    /// This value's encoding as a fresh string
    fn canonical_key(&self) -> String {
        let mut out = String::new();
        self.write_canonical(&mut out);
        out
    }
}

fn write_str(tag: char, s: &str, out: &mut String) {
    out.push(tag);
    out.push_str(&s.len().to_string());
    out.push(':');
    out.push_str(s);
}

fn write_float(value: f64, out: &mut String) {
    out.push('f');
    if value.is_nan() {
        out.push_str("NaN");
    } else {
        out.push_str(&format!("{:?}", value));
    }
}

fn write_seq<'a, T, I>(items: I, out: &mut String)
where
    T: CanonicalKey + 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
{
    out.push('[');
    for item in items {
        item.write_canonical(out);
        out.push(',');
    }
    out.push(']');
}

macro_rules! impl_canonical_int {
    ($tag:literal: $($ty:ty),+) => {
        $(
            impl CanonicalKey for $ty {
                fn write_canonical(&self, out: &mut String) {
                    out.push($tag);
                    out.push_str(&self.to_string());
                }
            }
        )+
    };
}

impl_canonical_int!('i': i8, i16, i32, i64, i128, isize);
impl_canonical_int!('u': u8, u16, u32, u64, u128, usize);

impl CanonicalKey for f32 {
    fn write_canonical(&self, out: &mut String) {
        write_float(f64::from(*self), out);
    }
}

impl CanonicalKey for f64 {
    fn write_canonical(&self, out: &mut String) {
        write_float(*self, out);
    }
}

impl CanonicalKey for bool {
    fn write_canonical(&self, out: &mut String) {
        out.push_str(if *self { "b1" } else { "b0" });
    }
}

impl CanonicalKey for char {
    fn write_canonical(&self, out: &mut String) {
        out.push('c');
        out.push(*self);
    }
}

impl CanonicalKey for () {
    fn write_canonical(&self, out: &mut String) {
        out.push_str("()");
    }
}

impl CanonicalKey for str {
    fn write_canonical(&self, out: &mut String) {
        write_str('s', self, out);
    }
}

impl CanonicalKey for String {
    fn write_canonical(&self, out: &mut String) {
        write_str('s', self, out);
    }
}

impl<T: CanonicalKey + ?Sized> CanonicalKey for &T {
    fn write_canonical(&self, out: &mut String) {
        (**self).write_canonical(out);
    }
}

impl<T: CanonicalKey + ?Sized> CanonicalKey for Box<T> {
    fn write_canonical(&self, out: &mut String) {
        (**self).write_canonical(out);
    }
}

impl<T: CanonicalKey> CanonicalKey for Option<T> {
    fn write_canonical(&self, out: &mut String) {
        match self {
            Some(value) => {
                out.push_str("S(");
                value.write_canonical(out);
                out.push(')');
            }
            None => out.push('N'),
        }
    }
}

impl<T: CanonicalKey> CanonicalKey for [T] {
    fn write_canonical(&self, out: &mut String) {
        write_seq(self, out);
    }
}

impl<T: CanonicalKey, const N: usize> CanonicalKey for [T; N] {
    fn write_canonical(&self, out: &mut String) {
        write_seq(self, out);
    }
}

impl<T: CanonicalKey> CanonicalKey for Vec<T> {
    fn write_canonical(&self, out: &mut String) {
        write_seq(self, out);
    }
}

impl<T: CanonicalKey> CanonicalKey for BTreeSet<T> {
    fn write_canonical(&self, out: &mut String) {
        write_seq(self, out);
    }
}

impl<K: CanonicalKey, V: CanonicalKey> CanonicalKey for BTreeMap<K, V> {
    fn write_canonical(&self, out: &mut String) {
        out.push('{');
        for (key, value) in self {
            key.write_canonical(out);
            out.push('=');
            value.write_canonical(out);
            out.push(',');
        }
        out.push('}');
    }
}

impl CanonicalKey for Value {
    /// Compact JSON text, which serde_json writes deterministically for a
    /// given value
    fn write_canonical(&self, out: &mut String) {
        write_str('j', &self.to_string(), out);
    }
}

macro_rules! impl_canonical_tuple {
    ($($name:ident),+) => {
        impl<$($name: CanonicalKey),+> CanonicalKey for ($($name,)+) {
            #[allow(non_snake_case)]
            fn write_canonical(&self, out: &mut String) {
                let ($($name,)+) = self;
                out.push('(');
                $(
                    $name.write_canonical(out);
                    out.push(',');
                )+
                out.push(')');
            }
        }
    };
}

impl_canonical_tuple!(A);
impl_canonical_tuple!(A, B);
impl_canonical_tuple!(A, B, C);
impl_canonical_tuple!(A, B, C, D);
impl_canonical_tuple!(A, B, C, D, E);
impl_canonical_tuple!(A, B, C, D, E, F);
impl_canonical_tuple!(A, B, C, D, E, F, G);
impl_canonical_tuple!(A, B, C, D, E, F, G, H);
