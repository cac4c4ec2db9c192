//! Command-line argument definitions for the Arcwire CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input manifest, configuration file
//! selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Arcwire architecture checker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input model manifest
    #[arg(help = "Path to the model manifest (TOML)")]
    pub input: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
