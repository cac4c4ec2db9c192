//! The subcomponent connectivity check.
//!
//! For every component the validator:
//!
//! - resolves both endpoints of each connector the component declares,
//!   including the simple connectors on its instances, and reports the ones
//!   denoting no port (`AC012` for sources, `AC013` for targets);
//! - reports every incoming port of every subcomponent that no connector
//!   targets (`AC008`);
//! - reports every outgoing port of every subcomponent that no connector
//!   reads from (`AC009`).
//!
//! Both kinds of wiring count as usage: connectors declared on the component
//! and simple connectors declared on any of its instances. Incoming ports
//! that exist only to receive a constant value are exempt from `AC008`.

use std::collections::HashSet;

use indexmap::IndexSet;
use log::{debug, trace, warn};

use arcwire_core::{
    identifier::Id,
    model::{Component, ComponentId, Connector, ExpandedId, Instance, Model, Port},
    qualified::QualifiedName,
};

use crate::{
    error::{Diagnostic, ErrorCode, Severity},
    resolve::{ResolutionError, Resolver},
};

/// Severities assigned to each class of finding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckConfig {
    unused_port: Severity,
    unresolved_endpoint: Severity,
}

impl CheckConfig {
    pub fn new(unused_port: Severity, unresolved_endpoint: Severity) -> Self {
        Self {
            unused_port,
            unresolved_endpoint,
        }
    }

    /// Severity of `AC008` and `AC009`.
    pub fn unused_port(&self) -> Severity {
        self.unused_port
    }

    /// Severity of `AC012` and `AC013`, and of instances whose type is not
    /// declared.
    pub fn unresolved_endpoint(&self) -> Severity {
        self.unresolved_endpoint
    }
}

/// Which end of a connector a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Source,
    Target,
}

impl Endpoint {
    fn code(self) -> ErrorCode {
        match self {
            Endpoint::Source => ErrorCode::AC012,
            Endpoint::Target => ErrorCode::AC013,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Endpoint::Source => "source",
            Endpoint::Target => "target",
        }
    }
}

/// Every endpoint name used by the wiring of one component.
///
/// Names are compared as written. Simple connector sources are stored
/// qualified with their instance name, so `y` on instance `s` reads as
/// `s.y`.
#[derive(Debug, Default)]
struct Wiring<'m> {
    targets: HashSet<&'m str>,
    sources: HashSet<&'m str>,
    simple_targets: HashSet<&'m str>,
    simple_sources: HashSet<String>,
}

impl<'m> Wiring<'m> {
    fn collect(component: &'m Component) -> Self {
        let mut wiring = Self::default();

        for connector in component.connectors() {
            wiring.targets.insert(connector.target());
            wiring.sources.insert(connector.source());
        }

        for instance in component.instances() {
            for connector in instance.simple_connectors() {
                wiring.simple_targets.insert(connector.target());
                wiring
                    .simple_sources
                    .insert(QualifiedName::qualify(instance.name(), connector.source()));
            }
        }

        wiring
    }
}

/// Checks subcomponent connectivity and connector resolution.
///
/// # Examples
///
/// ```
/// use arcwire_check::{CheckConfig, ConnectivityValidator, error::ErrorCode};
/// use arcwire_core::model::{Component, Connector, Instance, Model};
///
/// let model = Model::builder()
///     .component(Component::new("Inner").with_incoming("x").with_incoming("z"))
///     .component(
///         Component::new("Outer")
///             .with_incoming("a")
///             .with_instance(Instance::new("s", "Inner"))
///             .with_connector(Connector::new("a", "s.x")),
///     )
///     .build()
///     .unwrap();
///
/// let validator = ConnectivityValidator::new(&model, CheckConfig::default());
/// let (outer, _) = model.components().nth(1).unwrap();
/// let findings = validator.check_component(outer);
///
/// assert_eq!(findings.len(), 1);
/// assert_eq!(findings[0].code(), Some(ErrorCode::AC008));
/// ```
#[derive(Debug)]
pub struct ConnectivityValidator<'m> {
    model: &'m Model,
    resolver: Resolver<'m, Model>,
    config: CheckConfig,
}

impl<'m> ConnectivityValidator<'m> {
    pub fn new(model: &'m Model, config: CheckConfig) -> Self {
        Self {
            model,
            resolver: Resolver::new(model),
            config,
        }
    }

    /// Check one component and return its findings.
    ///
    /// Resolution findings come first, then the port findings of each
    /// instance in declaration order, incoming before outgoing. A component
    /// id that does not belong to the model yields no findings.
    pub fn check_component(&self, id: ComponentId) -> Vec<Diagnostic> {
        let Some(component) = self.model.component(id) else {
            warn!(component:% = id; "Component not in model, skipping");
            return Vec::new();
        };
        debug!(
            component:% = component.name(),
            instances = component.instances().len(),
            connectors = component.connectors().len();
            "Checking component"
        );

        let mut diagnostics = Vec::new();
        self.check_endpoints(component, &mut diagnostics);

        let wiring = Wiring::collect(component);
        for instance in component.instances() {
            let Some(instance_type) = self
                .model
                .component_named(instance.type_name())
                .and_then(|type_id| self.model.component(type_id))
            else {
                diagnostics.push(self.undeclared_type(component, instance));
                continue;
            };

            self.check_incoming(component, instance, instance_type, &wiring, &mut diagnostics);
            self.check_outgoing(component, instance, instance_type, &wiring, &mut diagnostics);
        }

        diagnostics
    }

    /// Resolve the endpoints of the connectors declared inside an expanded
    /// instance.
    ///
    /// Port usage is checked on component types only.
    pub fn check_expanded(&self, id: ExpandedId) -> Vec<Diagnostic> {
        let (Some(instance), Some(full_name)) =
            (self.model.expanded(id), self.model.expanded_full_name(id))
        else {
            warn!(instance:% = id; "Expanded instance not in model, skipping");
            return Vec::new();
        };
        debug!(
            instance:% = full_name,
            connectors = instance.connectors().len();
            "Checking expanded instance"
        );

        let mut diagnostics = Vec::new();
        for connector in instance.connectors() {
            if let Err(err) = self.resolver.source_port(connector) {
                diagnostics.push(self.unresolved(Endpoint::Source, connector, full_name, &err));
            }
            if let Err(err) = self.resolver.target_port(connector) {
                diagnostics.push(self.unresolved(Endpoint::Target, connector, full_name, &err));
            }
        }
        diagnostics
    }

    fn check_endpoints(&self, component: &'m Component, diagnostics: &mut Vec<Diagnostic>) {
        let scope = component.name();

        for connector in component.connectors() {
            if let Err(err) = self.resolver.source_port(connector) {
                diagnostics.push(self.unresolved(Endpoint::Source, connector, scope, &err));
            }
            if let Err(err) = self.resolver.target_port(connector) {
                diagnostics.push(self.unresolved(Endpoint::Target, connector, scope, &err));
            }
        }

        for instance in component.instances() {
            for connector in instance.simple_connectors() {
                if let Err(err) = self.resolver.simple_source_port(instance, connector) {
                    diagnostics.push(self.unresolved(Endpoint::Source, connector, scope, &err));
                }
                if let Err(err) = self.resolver.target_port(connector) {
                    diagnostics.push(self.unresolved(Endpoint::Target, connector, scope, &err));
                }
            }
        }
    }

    fn check_incoming(
        &self,
        component: &Component,
        instance: &Instance,
        instance_type: &Component,
        wiring: &Wiring<'_>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let mut remaining = qualified_ports(instance, instance_type.incoming_ports());
        remaining.retain(|name| !wiring.targets.contains(name.as_str()));
        if !remaining.is_empty() {
            remaining.retain(|name| !wiring.simple_targets.contains(name.as_str()));
        }

        for name in remaining {
            if Port::is_constant_name(&name) {
                trace!(port:% = name; "Constant port exempt from usage check");
                continue;
            }
            diagnostics.push(self.unused(ErrorCode::AC008, component, instance, &name));
        }
    }

    fn check_outgoing(
        &self,
        component: &Component,
        instance: &Instance,
        instance_type: &Component,
        wiring: &Wiring<'_>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let mut remaining = qualified_ports(instance, instance_type.outgoing_ports());
        remaining.retain(|name| !wiring.sources.contains(name.as_str()));
        if !remaining.is_empty() {
            remaining.retain(|name| !wiring.simple_sources.contains(name));
        }

        for name in remaining {
            diagnostics.push(self.unused(ErrorCode::AC009, component, instance, &name));
        }
    }

    fn unused(
        &self,
        code: ErrorCode,
        component: &Component,
        instance: &Instance,
        port: &str,
    ) -> Diagnostic {
        let subcomponent = component.name().qualify(instance.name());
        let help = match code {
            ErrorCode::AC008 => format!(
                "add a connector targeting `{port}` to `{}` or to one of its instances",
                component.name()
            ),
            _ => format!(
                "add a connector reading from `{port}` to `{}` or to one of its instances",
                component.name()
            ),
        };

        Diagnostic::error(format!(
            "port `{port}` of subcomponent `{subcomponent}` is not used"
        ))
        .with_severity(self.config.unused_port)
        .with_code(code)
        .with_label(instance.span(), format!("`{port}` is never connected"))
        .with_secondary_label(component.span(), format!("in component `{}`", component.name()))
        .with_help(help)
    }

    fn unresolved(
        &self,
        endpoint: Endpoint,
        connector: &Connector,
        scope: Id,
        err: &ResolutionError,
    ) -> Diagnostic {
        let reference = match endpoint {
            Endpoint::Source => connector.constant_value().unwrap_or(connector.source()),
            Endpoint::Target => connector.target(),
        };

        Diagnostic::error(format!(
            "no {} port found for connector `{}` in `{scope}`",
            endpoint.as_str(),
            describe(connector)
        ))
        .with_severity(self.config.unresolved_endpoint)
        .with_code(endpoint.code())
        .with_label(connector.span(), format!("cannot resolve `{reference}`"))
        .with_help(err.to_string())
    }

    fn undeclared_type(&self, component: &Component, instance: &Instance) -> Diagnostic {
        let subcomponent = component.name().qualify(instance.name());

        Diagnostic::error(format!(
            "subcomponent `{subcomponent}` has undeclared type `{}`",
            instance.type_name()
        ))
        .with_severity(self.config.unresolved_endpoint)
        .with_label(instance.span(), "instance declared here")
        .with_secondary_label(component.span(), format!("in component `{}`", component.name()))
        .with_help("declare the component type or fix the instance's type name")
    }
}

fn qualified_ports<'p>(instance: &Instance, ports: impl Iterator<Item = &'p Port>) -> IndexSet<String> {
    ports
        .map(|port| QualifiedName::qualify(instance.name(), port.name()))
        .collect()
}

fn describe(connector: &Connector) -> String {
    match connector.constant_value() {
        Some(value) => format!("{value} -> {}", connector.target()),
        None => format!("{} -> {}", connector.source(), connector.target()),
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ========================================================================
    // Strategies
    // ========================================================================

    const INCOMING: [&str; 4] = ["i0", "i1", "i2", "i3"];
    const OUTGOING: [&str; 4] = ["o0", "o1", "o2", "o3"];
    const INSTANCES: [&str; 3] = ["s", "t", "u"];

    /// A wiring choice: (instance index, port index, use a simple connector).
    fn wire_strategy() -> impl Strategy<Value = (usize, usize, bool)> {
        (0..INSTANCES.len(), 0..INCOMING.len(), any::<bool>())
    }

    fn wiring_strategy() -> impl Strategy<Value = (Vec<(usize, usize, bool)>, Vec<(usize, usize, bool)>)> {
        (
            prop::collection::vec(wire_strategy(), 0..12),
            prop::collection::vec(wire_strategy(), 0..12),
        )
    }

    fn build(
        incoming: &[(usize, usize, bool)],
        outgoing: &[(usize, usize, bool)],
    ) -> Model {
        build_with(incoming, outgoing, &[], false)
    }

    /// Like [`build`], plus constant simple connectors feeding the given
    /// (instance, port) pairs, and optionally two connectors that do not
    /// resolve.
    fn build_with(
        incoming: &[(usize, usize, bool)],
        outgoing: &[(usize, usize, bool)],
        constants: &[(usize, usize)],
        broken: bool,
    ) -> Model {
        let mut inner = Component::new("Inner");
        for port in INCOMING {
            inner = inner.with_incoming(port);
        }
        for port in OUTGOING {
            inner = inner.with_outgoing(port);
        }

        let mut instances: Vec<Instance> =
            INSTANCES.iter().map(|name| Instance::new(name, "Inner")).collect();
        let mut outer = Component::new("Outer").with_incoming("a").with_outgoing("b");

        for &(instance, port, simple) in incoming {
            let target = QualifiedName::qualify(INSTANCES[instance], INCOMING[port]);
            if simple {
                // Hosted on a different instance than the one it feeds.
                let host = (instance + 1) % INSTANCES.len();
                instances[host] = instances[host].clone().with_connector(Connector::new("o0", target));
            } else {
                outer = outer.with_connector(Connector::new("a", target));
            }
        }
        for &(instance, port, simple) in outgoing {
            if simple {
                instances[instance] =
                    instances[instance].clone().with_connector(Connector::new(OUTGOING[port], "b"));
            } else {
                let source = QualifiedName::qualify(INSTANCES[instance], OUTGOING[port]);
                outer = outer.with_connector(Connector::new(source, "b"));
            }
        }
        for &(instance, port) in constants {
            let target = QualifiedName::qualify(INSTANCES[instance], INCOMING[port]);
            let host = (instance + 1) % INSTANCES.len();
            instances[host] = instances[host].clone().with_connector(Connector::constant("1", target));
        }
        if broken {
            outer = outer
                .with_connector(Connector::new("s.nope", "b"))
                .with_connector(Connector::new("a", "bogus.i0"));
        }
        for instance in instances {
            outer = outer.with_instance(instance);
        }

        Model::builder().component(inner).component(outer).build().unwrap()
    }

    fn unused_ports(model: &Model, code: ErrorCode) -> HashSet<String> {
        let validator = ConnectivityValidator::new(model, CheckConfig::default());
        let outer = model.component_named(Id::new("Outer")).unwrap();
        validator
            .check_component(outer)
            .iter()
            .filter(|diagnostic| diagnostic.code() == Some(code))
            .map(|diagnostic| diagnostic.message().to_string())
            .collect()
    }

    // ========================================================================
    // Property Test Functions
    // ========================================================================

    fn check_every_port_reported_exactly_when_unwired(
        incoming: Vec<(usize, usize, bool)>,
        outgoing: Vec<(usize, usize, bool)>,
    ) -> Result<(), TestCaseError> {
        let model = build(&incoming, &outgoing);
        let validator = ConnectivityValidator::new(&model, CheckConfig::default());
        let findings = validator.check_component(model.component_named(Id::new("Outer")).unwrap());

        let fed: HashSet<(usize, usize)> =
            incoming.iter().map(|&(instance, port, _)| (instance, port)).collect();
        // Every simple connector on the incoming side reads `o0` of its host.
        let mut read: HashSet<(usize, usize)> = incoming
            .iter()
            .filter(|&&(_, _, simple)| simple)
            .map(|&(instance, _, _)| ((instance + 1) % INSTANCES.len(), 0))
            .collect();
        read.extend(outgoing.iter().map(|&(instance, port, _)| (instance, port)));

        let mut expected = 0;
        for instance in 0..INSTANCES.len() {
            for port in 0..INCOMING.len() {
                if !fed.contains(&(instance, port)) {
                    expected += 1;
                }
            }
            for port in 0..OUTGOING.len() {
                if !read.contains(&(instance, port)) {
                    expected += 1;
                }
            }
        }

        let unused = findings
            .iter()
            .filter(|diagnostic| diagnostic.code().is_some_and(|code| code.is_unused_port()))
            .count();
        prop_assert_eq!(unused, expected);
        prop_assert!(findings.iter().all(|d| d.code().is_some_and(|c| c.is_unused_port())));
        Ok(())
    }

    fn check_adding_wiring_never_adds_findings(
        incoming: Vec<(usize, usize, bool)>,
        outgoing: Vec<(usize, usize, bool)>,
        extra: (usize, usize, bool),
    ) -> Result<(), TestCaseError> {
        let before = build(&incoming, &outgoing);

        let mut more = incoming.clone();
        more.push(extra);
        let after = build(&more, &outgoing);

        let before_unused = unused_ports(&before, ErrorCode::AC008);
        let after_unused = unused_ports(&after, ErrorCode::AC008);
        prop_assert!(after_unused.is_subset(&before_unused));

        let before_unread = unused_ports(&before, ErrorCode::AC009);
        let after_unread = unused_ports(&after, ErrorCode::AC009);
        prop_assert!(after_unread.is_subset(&before_unread));
        Ok(())
    }

    fn check_supplying_a_target_removes_exactly_that_finding(
        incoming: Vec<(usize, usize, bool)>,
        outgoing: Vec<(usize, usize, bool)>,
        (instance, port): (usize, usize),
    ) -> Result<(), TestCaseError> {
        let before = build_with(&incoming, &outgoing, &[], true);
        let after = build_with(&incoming, &outgoing, &[(instance, port)], true);
        let outer = Id::new("Outer");

        let findings = |model: &Model| {
            let validator = ConnectivityValidator::new(model, CheckConfig::default());
            model
                .component_named(outer)
                .map(|id| validator.check_component(id))
                .unwrap_or_default()
        };
        let before = findings(&before);
        let after = findings(&after);

        let target = QualifiedName::qualify(INSTANCES[instance], INCOMING[port]);
        let message = format!(
            "port `{target}` of subcomponent `Outer.{}` is not used",
            INSTANCES[instance]
        );
        let is_target = |diagnostic: &Diagnostic| {
            diagnostic.code() == Some(ErrorCode::AC008) && diagnostic.message() == message
        };

        let fed = incoming.iter().any(|&(i, p, _)| (i, p) == (instance, port));
        prop_assert_eq!(before.iter().filter(|&d| is_target(d)).count(), usize::from(!fed));

        let expected: Vec<Diagnostic> = before.iter().filter(|&d| !is_target(d)).cloned().collect();
        prop_assert_eq!(after, expected);
        Ok(())
    }

    fn check_validation_is_deterministic(
        incoming: Vec<(usize, usize, bool)>,
        outgoing: Vec<(usize, usize, bool)>,
    ) -> Result<(), TestCaseError> {
        let model = build(&incoming, &outgoing);
        let validator = ConnectivityValidator::new(&model, CheckConfig::default());
        let outer = model.component_named(Id::new("Outer")).unwrap();

        prop_assert_eq!(validator.check_component(outer), validator.check_component(outer));
        Ok(())
    }

    // ========================================================================
    // Proptest Wrappers
    // ========================================================================

    proptest! {
        #[test]
        fn every_port_reported_exactly_when_unwired((incoming, outgoing) in wiring_strategy()) {
            check_every_port_reported_exactly_when_unwired(incoming, outgoing)?;
        }

        #[test]
        fn adding_wiring_never_adds_findings(
            (incoming, outgoing) in wiring_strategy(),
            extra in wire_strategy(),
        ) {
            check_adding_wiring_never_adds_findings(incoming, outgoing, extra)?;
        }

        #[test]
        fn supplying_a_target_removes_exactly_that_finding(
            (incoming, outgoing) in wiring_strategy(),
            target in (0..INSTANCES.len(), 0..INCOMING.len()),
        ) {
            check_supplying_a_target_removes_exactly_that_finding(incoming, outgoing, target)?;
        }

        #[test]
        fn validation_is_deterministic((incoming, outgoing) in wiring_strategy()) {
            check_validation_is_deterministic(incoming, outgoing)?;
        }
    }
}
