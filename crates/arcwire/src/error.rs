//! Error types for Arcwire operations.
//!
//! This module provides the main error type [`ArcwireError`] which wraps
//! the error conditions that can occur while loading and checking a model.

use std::io;

use thiserror::Error;

use arcwire_check::error::CheckError;

/// The main error type for Arcwire operations.
///
/// # Diagnostic Variants
///
/// The `Manifest` and `Check` variants carry structured findings with source
/// spans, together with the manifest text they point into, so they can be
/// rendered as annotated source excerpts.
#[derive(Debug, Error)]
pub enum ArcwireError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Manifest { err: CheckError, src: String },

    #[error("{err}")]
    Check { err: CheckError, src: String },
}

impl ArcwireError {
    /// Create a new `Manifest` error with the associated manifest source.
    pub fn new_manifest_error(err: CheckError, src: impl Into<String>) -> Self {
        Self::Manifest {
            err,
            src: src.into(),
        }
    }

    /// Create a new `Check` error with the associated manifest source.
    pub fn new_check_error(err: CheckError, src: impl Into<String>) -> Self {
        Self::Check {
            err,
            src: src.into(),
        }
    }

    /// The findings carried by this error, if any.
    pub fn check_error(&self) -> Option<&CheckError> {
        match self {
            Self::Io(_) => None,
            Self::Manifest { err, .. } | Self::Check { err, .. } => Some(err),
        }
    }
}
