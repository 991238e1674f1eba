//! Error handling utilities
//!
//! Centralized reporting of fatal errors for the command-line front end.

use crate::error::UnderbarError;
use tracing::error;

/// Exit code for errors that did not come from the library
const GENERAL_ERROR: i32 = 1;

/// Report a fatal error on stderr and pick the process exit code
///
/// Library errors print their user message and exit with their own code;
/// anything else prints as-is. With `verbose >= 1` the full cause chain
/// follows.
pub fn report_fatal_error(error: &anyhow::Error, verbose: u8) -> i32 {
    error!("Fatal error: {:#}", error);

    let exit_code = match error.downcast_ref::<UnderbarError>() {
        Some(underbar_err) => {
            eprintln!("Error: {}", underbar_err.user_message());
            underbar_err.exit_code()
        }
        None => {
            eprintln!("Error: {error}");
            GENERAL_ERROR
        }
    };

    if verbose >= 1 {
        eprintln!("\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            eprintln!("  {}: {}", i, cause);
        }
    }

    exit_code
}

/// Report a fatal error and exit the process
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    std::process::exit(report_fatal_error(&error, verbose))
}
