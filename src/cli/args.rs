//! CLI argument structures
//!
//! This module defines the command-line interface of `underbar`: global
//! options plus one subcommand per collection operation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Apply collection utilities to JSON documents
#[derive(Parser, Debug)]
#[command(name = "underbar")]
#[command(about = "underbar - functional collection utilities for JSON", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Read the input document from a file instead of stdin
    #[arg(short, long, global = true, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Print the result on a single line
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Remove duplicate elements, keeping first occurrences
    ///
    /// Numbers compare by value, so 1 and 1.0 are duplicates.
    Uniq {
        /// Compare elements by this property instead of the whole value
        #[arg(long, value_name = "FIELD")]
        by: Option<String>,

        /// Input is already sorted by the compared key
        #[arg(long)]
        sorted: bool,
    },

    /// Flatten nested arrays into a single array
    Flatten,

    /// Randomly permute an array
    Shuffle {
        /// Seed for a reproducible permutation
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Stable sort of an array by a property (dot paths allowed)
    #[command(name = "sort-by")]
    SortBy {
        /// Property to sort by
        field: String,
    },

    /// Extract a property from every element
    Pluck {
        /// Property to extract (dot paths allowed)
        field: String,
    },

    /// Combine an array of arrays position by position
    Zip,

    /// Elements of the first array present in every other array
    ///
    /// Numbers compare by value; integral floats print as integers.
    Intersection,

    /// Elements of the first array present in none of the others
    ///
    /// Numbers compare by value; integral floats print as integers.
    Difference,

    /// Whether an array or object contains a value
    ///
    /// Numbers compare by value, so 1 matches 1.0.
    Contains {
        /// Value to look for, as JSON
        value: String,
    },

    /// Whether every element is truthy
    Every,

    /// Whether at least one element is truthy
    Some,

    /// Sum an array of numbers
    Sum {
        /// Starting value; without it an empty array is an error
        #[arg(long)]
        initial: Option<f64>,
    },

    /// Call a string method on every element of an array of strings
    Invoke {
        /// Method name (to_uppercase, to_lowercase, trim, reverse)
        method: String,
    },
}
