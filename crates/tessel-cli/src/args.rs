//! Command-line argument definitions for the Tessel CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the model files to validate, the
//! configuration file, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Tessel model validator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON AST files of the model, loaded in the given order
    #[arg(required = true, help = "Paths to the model AST files")]
    pub inputs: Vec<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print every model element and its decorators after validation
    #[arg(long)]
    pub list: bool,
}
