//! CLI logic for the Arcwire architecture checker.
//!
//! This module contains the core CLI logic for checking model manifests.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use arcwire::{ArcwireError, ModelChecker, diagnostics::Diagnostic};

use error_adapter::{Reportable, diagnostics_to_reportables};

/// The outcome of a check run that found no errors.
#[derive(Debug)]
pub struct CheckReport {
    source: String,
    warnings: Vec<Diagnostic>,
}

impl CheckReport {
    /// Warnings found by the run.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// The checked manifest.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The warnings, ready for rendering against the manifest.
    pub fn reportables(&self) -> Vec<Reportable<'_>> {
        diagnostics_to_reportables(&self.warnings, &self.source)
    }
}

/// Run the Arcwire CLI application
///
/// This function loads the configuration, reads the input manifest and
/// checks the model it describes.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ArcwireError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Manifest errors
/// - Findings with error severity
pub fn run(args: &Args) -> Result<CheckReport, ArcwireError> {
    info!(input_path = args.input; "Checking manifest");

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let checker = ModelChecker::new(app_config);
    let warnings = checker.verify(&source)?;

    info!(input_path = args.input, warnings = warnings.len(); "Model is well connected");

    Ok(CheckReport { source, warnings })
}
