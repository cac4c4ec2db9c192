//! Arcwire - connectivity checking for hierarchical component architectures.
//!
//! Loads a model from a TOML manifest, resolves every connector endpoint to
//! the port it denotes, and reports subcomponent ports left unconnected.

pub mod config;
pub mod manifest;

mod error;

pub use arcwire_check::error as diagnostics;
pub use arcwire_core::{identifier, model, span};

pub use error::ArcwireError;

use std::{fs, path::Path};

use log::{debug, info, trace};

use arcwire_check::error::{CheckError, Diagnostic};
use arcwire_core::model::Model;

use config::AppConfig;

/// Loads and checks Arcwire models.
///
/// # Examples
///
/// ```
/// use arcwire::{ModelChecker, config::AppConfig};
///
/// let source = r#"
///     [[component]]
///     name = "Inner"
///     in = ["x"]
///
///     [[component]]
///     name = "Outer"
///     in = ["a"]
///
///       [[component.instance]]
///       name = "s"
///       type = "Inner"
///
///       [[component.connect]]
///       source = "a"
///       target = "s.x"
/// "#;
///
/// let checker = ModelChecker::new(AppConfig::default());
/// let warnings = checker.verify(source).expect("model should be well connected");
/// assert!(warnings.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ModelChecker {
    config: AppConfig,
}

impl ModelChecker {
    /// Create a new model checker with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including finding severities
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a manifest into a model.
    ///
    /// # Errors
    ///
    /// Returns [`ArcwireError::Manifest`] for syntax errors, manifest shape
    /// errors or duplicate declarations.
    pub fn load(&self, source: &str) -> Result<Model, ArcwireError> {
        let model =
            manifest::load(source).map_err(|err| ArcwireError::new_manifest_error(err, source))?;

        debug!(
            components = model.components().count(),
            expanded = model.expanded_instances().count();
            "Model loaded"
        );
        trace!(model:?; "Loaded model");

        Ok(model)
    }

    /// Run every check over a model.
    ///
    /// Returns the warnings on success. Findings with error severity fail
    /// the check and are returned, warnings included, in a [`CheckError`].
    pub fn check(&self, model: &Model) -> Result<Vec<Diagnostic>, CheckError> {
        info!("Checking model");
        arcwire_check::check(model, self.config.check().to_check_config())
    }

    /// Load a manifest and check the model it describes.
    ///
    /// # Errors
    ///
    /// Returns [`ArcwireError::Manifest`] if the manifest cannot be loaded
    /// and [`ArcwireError::Check`] if the check finds errors.
    pub fn verify(&self, source: &str) -> Result<Vec<Diagnostic>, ArcwireError> {
        let model = self.load(source)?;
        self.check(&model)
            .map_err(|err| ArcwireError::new_check_error(err, source))
    }

    /// Read a manifest file and check the model it describes.
    ///
    /// # Errors
    ///
    /// Returns [`ArcwireError::Io`] if the file cannot be read, and
    /// otherwise the errors of [`ModelChecker::verify`].
    pub fn verify_file(&self, path: impl AsRef<Path>) -> Result<Vec<Diagnostic>, ArcwireError> {
        let path = path.as_ref();
        info!(path:% = path.display(); "Reading manifest");
        let source = fs::read_to_string(path)?;
        self.verify(&source)
    }
}
