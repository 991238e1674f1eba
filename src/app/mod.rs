//! Application module
//!
//! Application-level functionality for the `underbar` binary:
//! - Configuration handling
//! - Logging setup
//! - Fatal error reporting

pub mod config;
pub mod error_handling;
pub mod logging;

pub use config::AppConfig;
pub use error_handling::{handle_fatal_error, report_fatal_error};
pub use logging::init_logging;
