//! # Arcwire Check
//!
//! Connector resolution and connectivity checks for Arcwire component
//! architectures. Given a built [`Model`], this crate resolves every
//! connector endpoint to the port it denotes and reports subcomponent ports
//! left unconnected.
//!
//! ## Usage
//!
//! ```
//! # use arcwire_check::{check, CheckConfig};
//! # use arcwire_core::model::{Component, Connector, Instance, Model};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = Model::builder()
//!         .component(Component::new("Inner").with_incoming("x").with_outgoing("y"))
//!         .component(
//!             Component::new("Outer")
//!                 .with_incoming("a")
//!                 .with_outgoing("b")
//!                 .with_instance(Instance::new("s", "Inner"))
//!                 .with_connector(Connector::new("a", "s.x"))
//!                 .with_connector(Connector::new("s.y", "b")),
//!         )
//!         .build()?;
//!
//!     let warnings = check(&model, CheckConfig::default())?;
//!     assert!(warnings.is_empty());
//!     Ok(())
//! }
//! ```

mod connectivity;
pub mod error;
mod resolve;

pub use connectivity::{CheckConfig, ConnectivityValidator};
pub use resolve::{ResolutionError, Resolver};

use log::{debug, info};

use arcwire_core::model::Model;

use error::{CheckError, Diagnostic, DiagnosticCollector};

/// Run every check over a model.
///
/// Components are checked in declaration order, then the connectors of
/// expanded instances in tree order. All findings are collected; the run
/// never stops at the first one.
///
/// # Returns
///
/// The warnings on success, or a [`CheckError`] carrying every finding,
/// warnings included, if at least one has error severity.
pub fn check(model: &Model, config: CheckConfig) -> Result<Vec<Diagnostic>, CheckError> {
    let validator = ConnectivityValidator::new(model, config);
    let mut collector = DiagnosticCollector::new();

    for (id, component) in model.components() {
        let findings = validator.check_component(id);
        debug!(component:% = component.name(), findings = findings.len(); "Component checked");
        collector.extend(findings);
    }

    for (id, _) in model.expanded_instances() {
        collector.extend(validator.check_expanded(id));
    }

    let result = collector.finish();
    match &result {
        Ok(warnings) => info!(warnings = warnings.len(); "Check passed"),
        Err(err) => info!(
            errors = err.error_count(),
            findings = err.diagnostics().len();
            "Check failed"
        ),
    }
    result
}
