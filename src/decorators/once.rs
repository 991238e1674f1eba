//! Single-shot function wrapper

use once_cell::sync::OnceCell;
use std::fmt;
use tracing::debug;

/// A function that runs at most once
///
/// The first successful call stores its result; every later call returns a
/// clone of it, whatever arguments it is given. Concurrent first calls block
/// until the single underlying call finishes.
pub struct Once<F, R> {
    func: F,
    result: OnceCell<R>,
}

/// Wrap `func` so it runs at most once
pub fn once<F, R>(func: F) -> Once<F, R> {
    Once {
        func,
        result: OnceCell::new(),
    }
}

impl<F, R> Once<F, R> {
    /// Call the wrapped function, or replay its first result
    pub fn call<A>(&self, args: A) -> R
    where
        F: Fn(A) -> R,
        R: Clone,
    {
        self.result
            .get_or_init(|| {
                debug!("Running once-wrapped function");
                (self.func)(args)
            })
            .clone()
    }

    /// Call a fallible wrapped function
    ///
    /// An error is returned to the caller and not stored, so the wrapper
    /// stays uninvoked and the next call runs the function again.
    pub fn try_call<A, E>(&self, args: A) -> Result<R, E>
    where
        F: Fn(A) -> Result<R, E>,
        R: Clone,
    {
        self.result
            .get_or_try_init(|| {
                debug!("Running once-wrapped fallible function");
                (self.func)(args)
            })
            .cloned()
    }

    /// Whether the function has completed successfully
    pub fn is_invoked(&self) -> bool {
        self.result.get().is_some()
    }

    /// The stored result, if the function has run
    pub fn get(&self) -> Option<&R> {
        self.result.get()
    }
}

impl<F, R: fmt::Debug> fmt::Debug for Once<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Once")
            .field("result", &self.result.get())
            .finish_non_exhaustive()
    }
}
