//! Expanded instance trees.
//!
//! An expanded instance is a node of the materialized instance hierarchy
//! produced by auto-instantiation. Its ports are concrete copies of its
//! component type's ports and its children are reachable by name.

use crate::{
    identifier::Id,
    model::{
        ExpandedId,
        component::{find_directed_port, find_port},
        connector::Connector,
        port::{Direction, Port},
    },
    span::Span,
};

/// A node of an expanded instance tree.
///
/// Trees are declared nested with [`ExpandedInstance::with_child`]; building
/// the model flattens them into the arena and links children by
/// [`ExpandedId`].
///
/// # Examples
///
/// ```
/// use arcwire_core::model::{Component, ExpandedInstance, Model};
///
/// let model = Model::builder()
///     .component(Component::new("Inner").with_incoming("x"))
///     .component(Component::new("Outer"))
///     .expansion(
///         ExpandedInstance::new("outer", "Outer")
///             .with_child(ExpandedInstance::new("s", "Inner")),
///     )
///     .build()
///     .unwrap();
///
/// let (_, root) = model.expanded_instances().next().unwrap();
/// assert_eq!(root.children().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ExpandedInstance {
    name: Id,
    type_name: Id,
    ports: Vec<Port>,
    connectors: Vec<Connector>,
    pending_children: Vec<ExpandedInstance>,
    children: Vec<ExpandedId>,
    parent: Option<ExpandedId>,
    span: Span,
}

impl ExpandedInstance {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: Id::new(name),
            type_name: Id::new(type_name),
            ports: Vec::new(),
            connectors: Vec::new(),
            pending_children: Vec::new(),
            children: Vec::new(),
            parent: None,
            span: Span::default(),
        }
    }

    pub fn with_child(mut self, child: ExpandedInstance) -> Self {
        self.pending_children.push(child);
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

    pub fn type_name(&self) -> Id {
        self.type_name
    }

    /// Concrete ports, copied from the component type at build time.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn port(&self, name: Id) -> Option<&Port> {
        find_port(&self.ports, name)
    }

    pub fn directed_port(&self, name: Id, direction: Direction) -> Option<&Port> {
        find_directed_port(&self.ports, name, direction)
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn children(&self) -> &[ExpandedId] {
        &self.children
    }

    pub fn parent(&self) -> Option<ExpandedId> {
        self.parent
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub(crate) fn take_pending_children(&mut self) -> Vec<ExpandedInstance> {
        std::mem::take(&mut self.pending_children)
    }

    pub(crate) fn materialize(&mut self, ports: &[Port], parent: Option<ExpandedId>) {
        self.ports = ports.to_vec();
        self.parent = parent;
    }

    pub(crate) fn set_children(&mut self, children: Vec<ExpandedId>) {
        self.children = children;
    }

    pub(crate) fn connectors_mut(&mut self) -> &mut [Connector] {
        &mut self.connectors
    }
}
