//! Mock implementations for testing
//!
//! Test doubles for the abstractions in [`crate::abstractions`].

pub mod scheduler;

pub use scheduler::ManualScheduler;
