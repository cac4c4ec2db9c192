//! The symbol lookup capability the checks are written against.

use crate::{
    identifier::Id,
    model::{
        Component, Direction, ExpandedId, ExpandedInstance, Instance, Model, Port, ScopeId,
    },
};

/// The kind of symbol a lookup asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A port of either direction. Incoming ports shadow outgoing ones.
    Port,
    /// A port of the given direction only.
    DirectedPort(Direction),
    Instance,
    ExpandedInstance,
}

/// A symbol found by [`SymbolTable::resolve`].
#[derive(Debug, Clone, Copy)]
pub enum Symbol<'m> {
    Port(&'m Port),
    Instance(&'m Instance),
    ExpandedInstance(ExpandedId, &'m ExpandedInstance),
}

impl<'m> Symbol<'m> {
    pub fn as_port(self) -> Option<&'m Port> {
        match self {
            Symbol::Port(port) => Some(port),
            _ => None,
        }
    }

    pub fn as_instance(self) -> Option<&'m Instance> {
        match self {
            Symbol::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_expanded(self) -> Option<(ExpandedId, &'m ExpandedInstance)> {
        match self {
            Symbol::ExpandedInstance(id, instance) => Some((id, instance)),
            _ => None,
        }
    }
}

/// The symbol spanning a scope: either a component type or a node of an
/// expanded instance tree.
#[derive(Debug, Clone, Copy)]
pub enum Spanning<'m> {
    Component(&'m Component),
    Expanded(&'m ExpandedInstance),
}

impl<'m> Spanning<'m> {
    pub fn name(&self) -> Id {
        match self {
            Spanning::Component(component) => component.name(),
            Spanning::Expanded(instance) => instance.name(),
        }
    }

    /// Look up a boundary port of the spanning symbol.
    pub fn port(&self, name: Id) -> Option<&'m Port> {
        match self {
            Spanning::Component(component) => component.port(name),
            Spanning::Expanded(instance) => instance.port(name),
        }
    }

    /// Look up a boundary port of the spanning symbol with the given direction.
    pub fn directed_port(&self, name: Id, direction: Direction) -> Option<&'m Port> {
        match self {
            Spanning::Component(component) => component.directed_port(name, direction),
            Spanning::Expanded(instance) => instance.directed_port(name, direction),
        }
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self, Spanning::Expanded(_))
    }
}

/// Scope-based symbol lookup.
///
/// This is the narrow interface the resolver needs from whatever builds the
/// symbol table. [`Model`] implements it over its arena.
pub trait SymbolTable {
    /// The symbol spanning `scope`, or `None` if the scope does not exist.
    fn spanning(&self, scope: ScopeId) -> Option<Spanning<'_>>;

    /// Look up a bare `name` of the given kind directly inside `scope`.
    ///
    /// No qualification is interpreted here; `name` must be a single segment.
    fn resolve(&self, name: &str, kind: SymbolKind, scope: ScopeId) -> Option<Symbol<'_>>;

    /// The scope of the component type an instance refers to.
    fn type_scope(&self, instance: &Instance) -> Option<ScopeId>;
}

impl SymbolTable for Model {
    fn spanning(&self, scope: ScopeId) -> Option<Spanning<'_>> {
        match scope {
            ScopeId::Component(id) => self.component(id).map(Spanning::Component),
            ScopeId::Expanded(id) => self.expanded(id).map(Spanning::Expanded),
        }
    }

    fn resolve(&self, name: &str, kind: SymbolKind, scope: ScopeId) -> Option<Symbol<'_>> {
        let name = Id::lookup(name)?;
        let spanning = self.spanning(scope)?;

        match (kind, spanning) {
            (SymbolKind::Port, spanning) => spanning.port(name).map(Symbol::Port),
            (SymbolKind::DirectedPort(direction), spanning) => {
                spanning.directed_port(name, direction).map(Symbol::Port)
            }
            (SymbolKind::Instance, Spanning::Component(component)) => {
                component.instance(name).map(Symbol::Instance)
            }
            (SymbolKind::ExpandedInstance, Spanning::Expanded(instance)) => instance
                .children()
                .iter()
                .filter_map(|&id| Some((id, self.expanded(id)?)))
                .find(|(_, child)| child.name() == name)
                .map(|(id, child)| Symbol::ExpandedInstance(id, child)),
            _ => None,
        }
    }

    fn type_scope(&self, instance: &Instance) -> Option<ScopeId> {
        self.component_named(instance.type_name())
            .map(ScopeId::Component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentId, Connector};

    fn model() -> Model {
        Model::builder()
            .component(Component::new("Inner").with_incoming("x").with_outgoing("y"))
            .component(
                Component::new("Outer")
                    .with_incoming("a")
                    .with_instance(Instance::new("s", "Inner"))
                    .with_instance(Instance::new("ghost", "Missing"))
                    .with_connector(Connector::new("a", "s.x")),
            )
            .expansion(
                ExpandedInstance::new("outer", "Outer")
                    .with_child(ExpandedInstance::new("s", "Inner")),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_spanning() {
        let model = model();

        let spanning = model.spanning(ScopeId::Component(ComponentId(1))).unwrap();
        assert_eq!(spanning.name(), "Outer");
        assert!(!spanning.is_expanded());

        let spanning = model.spanning(ScopeId::Expanded(ExpandedId(0))).unwrap();
        assert_eq!(spanning.name(), "outer");
        assert!(spanning.is_expanded());

        assert!(model.spanning(ScopeId::Component(ComponentId(9))).is_none());
    }

    #[test]
    fn test_resolve_port() {
        let model = model();
        let inner = ScopeId::Component(ComponentId(0));

        let port = model.resolve("y", SymbolKind::Port, inner).unwrap();
        assert!(port.as_port().unwrap().is_outgoing());
        assert!(model.resolve("z", SymbolKind::Port, inner).is_none());
    }

    #[test]
    fn test_resolve_directed_port() {
        let model = model();
        let inner = ScopeId::Component(ComponentId(0));

        let port = model
            .resolve("y", SymbolKind::DirectedPort(Direction::Out), inner)
            .and_then(Symbol::as_port)
            .unwrap();
        assert_eq!(port.name(), "y");
        assert!(
            model
                .resolve("y", SymbolKind::DirectedPort(Direction::In), inner)
                .is_none()
        );

        let expanded = ScopeId::Expanded(ExpandedId(1));
        assert!(
            model
                .resolve("x", SymbolKind::DirectedPort(Direction::In), expanded)
                .is_some()
        );
    }

    #[test]
    fn test_resolve_does_not_interpret_qualification() {
        let model = model();
        let outer = ScopeId::Component(ComponentId(1));

        assert!(model.resolve("s.x", SymbolKind::Port, outer).is_none());
    }

    #[test]
    fn test_resolve_instance_only_in_component_scope() {
        let model = model();

        let outer = ScopeId::Component(ComponentId(1));
        assert!(model.resolve("s", SymbolKind::Instance, outer).is_some());

        let expanded = ScopeId::Expanded(ExpandedId(0));
        assert!(model.resolve("s", SymbolKind::Instance, expanded).is_none());
        let (id, child) = model
            .resolve("s", SymbolKind::ExpandedInstance, expanded)
            .and_then(Symbol::as_expanded)
            .unwrap();
        assert_eq!(id, ExpandedId(1));
        assert_eq!(child.ports().len(), 2);
    }

    #[test]
    fn test_type_scope() {
        let model = model();
        let outer = model.component(ComponentId(1)).unwrap();

        let s = outer.instance(Id::new("s")).unwrap();
        assert_eq!(model.type_scope(s), Some(ScopeId::Component(ComponentId(0))));

        let ghost = outer.instance(Id::new("ghost")).unwrap();
        assert_eq!(model.type_scope(ghost), None);
    }
}
