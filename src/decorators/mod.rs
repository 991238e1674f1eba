//! Function decorators
//!
//! Wrappers that change how and when a function runs: [`once`] runs it a
//! single time, [`memoize`] caches its results, [`delay`] defers it and
//! [`throttle`] rate-limits it. Each wrapper owns its own state and is safe
//! to share between threads.

pub mod canonical;
pub mod delay;
pub mod memoize;
pub mod once;
pub mod throttle;

pub use canonical::CanonicalKey;
pub use delay::delay;
pub use memoize::{memoize, Memoize};
pub use once::{once, Once};
pub use throttle::{throttle, throttle_with, Throttle};
