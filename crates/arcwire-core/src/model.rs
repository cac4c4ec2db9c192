//! The architecture model consumed by the checks.
//!
//! A [`Model`] is an arena: components and expanded instances live in
//! vectors and refer to each other through [`ComponentId`], [`ExpandedId`]
//! and the tagged [`ScopeId`]. Connectors store the id of their owning scope
//! instead of a reference, so there are no ownership cycles between a
//! connector, its scope and the symbol spanning that scope.
//!
//! Models are constructed once through [`ModelBuilder`] and are read-only
//! afterwards. The only interior mutability is the memoized constant port
//! of a constant [`Connector`].

mod builder;
mod component;
mod connector;
mod expanded;
mod port;
mod symbol;

pub use builder::{ModelBuilder, ModelError};
pub use component::{Component, Instance};
pub use connector::Connector;
pub use expanded::ExpandedInstance;
pub use port::{CONSTANT_PORT_PREFIX, Direction, Port};
pub use symbol::{Spanning, Symbol, SymbolKind, SymbolTable};

use std::fmt;

use crate::identifier::Id;

/// Index of a component in a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) usize);

/// Index of an expanded instance in a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpandedId(pub(crate) usize);

/// A scope that can declare connectors and own ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeId {
    Component(ComponentId),
    Expanded(ExpandedId),
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

impl fmt::Display for ExpandedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expanded#{}", self.0)
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeId::Component(id) => fmt::Display::fmt(id, f),
            ScopeId::Expanded(id) => fmt::Display::fmt(id, f),
        }
    }
}

/// A built, read-only architecture model.
#[derive(Debug, Clone, Default)]
pub struct Model {
    components: Vec<Component>,
    expanded: Vec<ExpandedInstance>,
}

impl Model {
    /// Start building a model.
    pub fn builder() -> ModelBuilder {
        ModelBuilder::new()
    }

    /// All components in declaration order.
    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components
            .iter()
            .enumerate()
            .map(|(idx, component)| (ComponentId(idx), component))
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.0)
    }

    /// Find a component type by name.
    pub fn component_named(&self, name: Id) -> Option<ComponentId> {
        self.components
            .iter()
            .position(|component| component.name() == name)
            .map(ComponentId)
    }

    /// All expanded instances; each tree is laid out parent first.
    pub fn expanded_instances(&self) -> impl Iterator<Item = (ExpandedId, &ExpandedInstance)> {
        self.expanded
            .iter()
            .enumerate()
            .map(|(idx, instance)| (ExpandedId(idx), instance))
    }

    pub fn expanded(&self, id: ExpandedId) -> Option<&ExpandedInstance> {
        self.expanded.get(id.0)
    }

    /// Fully qualified name of an expanded instance, e.g. `outer.s.t`.
    pub fn expanded_full_name(&self, id: ExpandedId) -> Option<Id> {
        let instance = self.expanded(id)?;
        match instance.parent() {
            Some(parent) => Some(self.expanded_full_name(parent)?.qualify(instance.name())),
            None => Some(instance.name()),
        }
    }

    pub(crate) fn from_parts(components: Vec<Component>, expanded: Vec<ExpandedInstance>) -> Self {
        Self {
            components,
            expanded,
        }
    }
}
