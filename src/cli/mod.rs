//! CLI command handlers
//!
//! This module contains the command-line front end:
//! - Argument parsing structures
//! - Command implementations over JSON documents
//! - Input loading and output rendering

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
pub use commands::execute;

use crate::app::AppConfig;
use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Load the input document from `path`, or from stdin when no path is given
pub fn read_input(path: Option<&Path>) -> Result<Value> {
    let text = match path {
        Some(path) => {
            debug!("Reading input from {}", path.display());
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file {}", path.display()))?
        }
        None => {
            debug!("Reading input from stdin");
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read input from stdin")?;
            text
        }
    };
    serde_json::from_str(&text).context("Input is not valid JSON")
}

/// Serialize a result document for printing
pub fn render(value: &Value, config: &AppConfig) -> Result<String> {
    let text = if config.compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(text)
}

/// Read input, run the selected command and return the rendered output
pub fn run(cli: &Cli, config: &AppConfig) -> Result<String> {
    let input = read_input(cli.input.as_deref())?;
    let output = execute(&cli.command, &input)?;
    render(&output, config)
}
