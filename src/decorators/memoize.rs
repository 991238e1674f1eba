//! Result caching keyed by canonical arguments

use super::canonical::CanonicalKey;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

/// A function whose results are cached per distinct argument value
///
/// Arguments are identified by their [`CanonicalKey`]; pass a tuple to
/// memoize over several arguments. Each key is computed at most once, even
/// when parallel callers ask for it together, while different keys compute
/// independently. Entries are never evicted.
pub struct Memoize<F, R> {
    func: F,
    table: Mutex<HashMap<String, Arc<OnceCell<R>>>>,
}

/// Wrap `func` with an unbounded result cache
pub fn memoize<F, R>(func: F) -> Memoize<F, R> {
    Memoize {
        func,
        table: Mutex::new(HashMap::new()),
    }
}

impl<F, R> Memoize<F, R> {
    fn slot(&self, key: &str) -> Arc<OnceCell<R>> {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        match table.get(key) {
            Some(slot) => Arc::clone(slot),
            None => {
                let slot = Arc::new(OnceCell::new());
                table.insert(key.to_string(), Arc::clone(&slot));
                slot
            }
        }
    }

    /// Return the cached result for `args`, computing it on first request
    pub fn call<A>(&self, args: A) -> R
    where
        A: CanonicalKey,
        F: Fn(A) -> R,
        R: Clone,
    {
        let key = args.canonical_key();
        let slot = self.slot(&key);
        if let Some(result) = slot.get() {
            trace!(key = %key, "memo hit");
            return result.clone();
        }
        slot.get_or_init(|| {
            trace!(key = %key, "memo miss");
            (self.func)(args)
        })
        .clone()
    }

    /// Like [`Memoize::call`] for fallible functions; errors are returned
    /// and not cached
    pub fn try_call<A, E>(&self, args: A) -> Result<R, E>
    where
        A: CanonicalKey,
        F: Fn(A) -> Result<R, E>,
        R: Clone,
    {
        let key = args.canonical_key();
        let slot = self.slot(&key);
        let result = slot
            .get_or_try_init(|| {
                trace!(key = %key, "memo miss");
                (self.func)(args)
            })
            .cloned();
        if result.is_err() {
            self.discard_empty(&key, &slot);
        }
        result
    }

    fn discard_empty(&self, key: &str, slot: &Arc<OnceCell<R>>) {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        let unfilled = table
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && current.get().is_none());
        if unfilled {
            table.remove(key);
        }
    }

    /// Whether a result for `args` is already cached
    pub fn is_cached<A: CanonicalKey + ?Sized>(&self, args: &A) -> bool {
        let key = args.canonical_key();
        let table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        table.get(&key).is_some_and(|slot| slot.get().is_some())
    }

    /// Number of cached results
    pub fn len(&self) -> usize {
        let table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        table.values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<F, R> fmt::Debug for Memoize<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoize")
            .field("cached", &self.len())
            .finish_non_exhaustive()
    }
}
