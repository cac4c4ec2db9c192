//! Component types and the subcomponent instances they contain.

use crate::{
    identifier::Id,
    model::{
        connector::Connector,
        port::{Direction, Port},
    },
    span::Span,
};

/// A reusable component type.
///
/// A component owns its ports and the connectors declared at its level, and
/// names (without owning) the component types of its subcomponent instances.
/// Ports, instances and connectors keep their declaration order.
///
/// # Examples
///
/// ```
/// use arcwire_core::model::{Component, Connector, Instance};
///
/// let outer = Component::new("Outer")
///     .with_incoming("a")
///     .with_outgoing("b")
///     .with_instance(Instance::new("s", "Inner"))
///     .with_connector(Connector::new("a", "s.x"))
///     .with_connector(Connector::new("s.y", "b"));
///
/// assert_eq!(outer.incoming_ports().count(), 1);
/// assert_eq!(outer.instances().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Component {
    name: Id,
    ports: Vec<Port>,
    instances: Vec<Instance>,
    connectors: Vec<Connector>,
    span: Span,
}

impl Component {
    pub fn new(name: &str) -> Self {
        Self {
            name: Id::new(name),
            ports: Vec::new(),
            instances: Vec::new(),
            connectors: Vec::new(),
            span: Span::default(),
        }
    }

    /// Declare an incoming port.
    pub fn with_incoming(self, name: &str) -> Self {
        self.with_port(Port::incoming(name))
    }

    /// Declare an outgoing port.
    pub fn with_outgoing(self, name: &str) -> Self {
        self.with_port(Port::outgoing(name))
    }

    pub fn with_port(mut self, port: Port) -> Self {
        self.ports.push(port);
        self
    }

    pub fn with_instance(mut self, instance: Instance) -> Self {
        self.instances.push(instance);
        self
    }

    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connectors.push(connector);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    /// All declared ports, in declaration order.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn incoming_ports(&self) -> impl Iterator<Item = &Port> {
        self.ports.iter().filter(|port| port.is_incoming())
    }

    pub fn outgoing_ports(&self) -> impl Iterator<Item = &Port> {
        self.ports.iter().filter(|port| port.is_outgoing())
    }

    /// Find a port by name. Incoming ports shadow outgoing ones of the same name.
    pub fn port(&self, name: Id) -> Option<&Port> {
        find_port(&self.ports, name)
    }

    /// Find a port by name and direction.
    pub fn directed_port(&self, name: Id, direction: Direction) -> Option<&Port> {
        find_directed_port(&self.ports, name, direction)
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn instance(&self, name: Id) -> Option<&Instance> {
        self.instances.iter().find(|instance| instance.name == name)
    }

    /// Connectors declared at this component's level.
    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub(crate) fn connectors_mut(&mut self) -> &mut [Connector] {
        &mut self.connectors
    }

    pub(crate) fn instances_mut(&mut self) -> &mut [Instance] {
        &mut self.instances
    }
}

/// A named subcomponent inside a parent component.
///
/// Besides its name and type, an instance owns its simple connectors:
/// shorthand wires declared at the instance whose sources are relative to
/// the instance (`y` meaning `s.y`) and whose targets are qualified from the
/// parent's perspective.
#[derive(Debug, Clone)]
pub struct Instance {
    name: Id,
    type_name: Id,
    connectors: Vec<Connector>,
    span: Span,
}

impl Instance {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: Id::new(name),
            type_name: Id::new(type_name),
            connectors: Vec::new(),
            span: Span::default(),
        }
    }

    /// Declare a simple connector on this instance.
    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connectors.push(connector);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    /// Name of the component type this instance instantiates.
    pub fn type_name(&self) -> Id {
        self.type_name
    }

    pub fn simple_connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub(crate) fn connectors_mut(&mut self) -> &mut [Connector] {
        &mut self.connectors
    }
}

pub(crate) fn find_port(ports: &[Port], name: Id) -> Option<&Port> {
    ports
        .iter()
        .filter(|port| port.name() == name)
        .min_by_key(|port| port.is_outgoing())
}

pub(crate) fn find_directed_port(ports: &[Port], name: Id, direction: Direction) -> Option<&Port> {
    ports
        .iter()
        .find(|port| port.name() == name && port.direction() == direction)
}
