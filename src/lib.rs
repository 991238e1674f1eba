//! # underbar
//!
//! Functional collection and function-behaviour utilities.
//!
//! ## Usage
//!
//! ```
//! use underbar::{reduce, sort_by, uniq, zip};
//!
//! assert_eq!(reduce(&[1, 2, 3], |total: i32, n: &i32| total + n, Some(0)).unwrap(), 6);
//! assert_eq!(uniq(&[1, 2, 1, 3], false), vec![1, 2, 3]);
//! assert_eq!(sort_by(&["ccc", "a", "bb"], |s| s.len()), vec!["a", "bb", "ccc"]);
//! assert_eq!(
//!     zip(&[vec![1, 2], vec![3]]),
//!     vec![vec![Some(1), Some(3)], vec![Some(2), None]]
//! );
//! ```
//!
//! ## Modules
//!
//! - `core` - Pure collection algorithms: iteration, set algebra, ordering, shuffling, dispatch
//! - `decorators` - Function wrappers: once, memoize, delay, throttle
//! - `abstractions` - Clock and timer trait used by the time-based decorators
//! - `config` - Decorator options
//! - `error` - Error types and codes
//! - `app` - Logging and configuration for the binary
//! - `cli` - Command-line front end over JSON documents
//! - `testing` - Test doubles such as a manually advanced scheduler

pub mod abstractions;
pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod decorators;
pub mod error;

pub mod testing;

pub use crate::abstractions::{Scheduler, TaskHandle, TokioScheduler};
pub use crate::config::ThrottleOptions;
pub use crate::core::*;
pub use crate::decorators::*;
pub use crate::error::{ErrorCode, Result, UnderbarError};
