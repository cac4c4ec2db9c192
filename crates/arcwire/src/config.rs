//! Configuration types for Arcwire checks.
//!
//! This module provides configuration structures that control how findings
//! are reported. All types implement [`serde::Deserialize`] for loading from
//! external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`CheckSection`] - Severity of each class of finding.
//! - [`SeverityLevel`] - A severity as written in a configuration file.
//!
//! # Example
//!
//! ```
//! # use arcwire::config::{AppConfig, SeverityLevel};
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.check().unused_ports(), SeverityLevel::Error);
//! ```

use serde::Deserialize;

use arcwire_check::{CheckConfig, error::Severity};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Check configuration section.
    #[serde(default)]
    check: CheckSection,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified check configuration.
    pub fn new(check: CheckSection) -> Self {
        Self { check }
    }

    /// Returns the check configuration.
    pub fn check(&self) -> &CheckSection {
        &self.check
    }
}

/// Severity of each class of finding.
///
/// ```toml
/// [check]
/// unused_ports = "warning"
/// unresolved_endpoints = "error"
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckSection {
    /// Severity of unconnected subcomponent ports (`AC008`, `AC009`).
    #[serde(default)]
    unused_ports: SeverityLevel,

    /// Severity of connector endpoints that denote no port (`AC012`, `AC013`).
    #[serde(default)]
    unresolved_endpoints: SeverityLevel,
}

impl CheckSection {
    pub fn new(unused_ports: SeverityLevel, unresolved_endpoints: SeverityLevel) -> Self {
        Self {
            unused_ports,
            unresolved_endpoints,
        }
    }

    pub fn unused_ports(&self) -> SeverityLevel {
        self.unused_ports
    }

    pub fn unresolved_endpoints(&self) -> SeverityLevel {
        self.unresolved_endpoints
    }

    /// The [`CheckConfig`] this section describes.
    pub fn to_check_config(&self) -> CheckConfig {
        CheckConfig::new(self.unused_ports.into(), self.unresolved_endpoints.into())
    }
}

/// A severity as written in a configuration file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    #[default]
    Error,
    Warning,
}

impl From<SeverityLevel> for Severity {
    fn from(level: SeverityLevel) -> Self {
        match level {
            SeverityLevel::Error => Severity::Error,
            SeverityLevel::Warning => Severity::Warning,
        }
    }
}
