//! Abstraction layer for external dependencies
//!
//! Trait boundaries for the clock and timer used by the time-based
//! decorators, so they can be driven by tokio or by a test double.

pub mod scheduler;

pub use scheduler::{Scheduler, Task, TaskHandle, TokioScheduler};
