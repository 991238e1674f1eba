//! Testing utilities
//!
//! Test doubles and helpers shared by unit tests, integration tests and
//! benchmarks.

pub mod mocks;

use std::sync::{Arc, Mutex, PoisonError};

pub use mocks::ManualScheduler;

/// Thread-safe log of the arguments a wrapped function was called with
#[derive(Debug)]
pub struct CallLog<T> {
    calls: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for CallLog<T> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<T> Default for CallLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CallLog<T> {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Record one call
    pub fn record(&self, args: T) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(args);
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Copy of every recorded call, oldest first
    pub fn calls(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
