//! Construction of [`Model`]s.

use std::collections::HashMap;

use log::{debug, trace};
use thiserror::Error;

use crate::{
    identifier::Id,
    model::{
        Component, ComponentId, Connector, Direction, ExpandedId, ExpandedInstance, Model,
        ScopeId,
    },
    span::Span,
};

/// Structural defects that prevent a model from being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("component `{name}` is declared more than once")]
    DuplicateComponent { name: Id, span: Span, first: Span },

    #[error("{direction} port `{port}` is declared more than once in component `{component}`")]
    DuplicatePort {
        component: Id,
        port: Id,
        direction: Direction,
        span: Span,
        first: Span,
    },

    #[error("instance `{instance}` is declared more than once in component `{component}`")]
    DuplicateInstance {
        component: Id,
        instance: Id,
        span: Span,
        first: Span,
    },

    #[error("expanded instance `{parent}` has more than one child named `{child}`")]
    DuplicateExpandedChild {
        parent: Id,
        child: Id,
        span: Span,
        first: Span,
    },

    #[error("expanded instance `{instance}` refers to undeclared component type `{type_name}`")]
    UnknownExpansionType {
        instance: Id,
        type_name: Id,
        span: Span,
    },
}

impl ModelError {
    /// Location of the offending declaration.
    pub fn span(&self) -> Span {
        match self {
            ModelError::DuplicateComponent { span, .. }
            | ModelError::DuplicatePort { span, .. }
            | ModelError::DuplicateInstance { span, .. }
            | ModelError::DuplicateExpandedChild { span, .. }
            | ModelError::UnknownExpansionType { span, .. } => *span,
        }
    }

    /// Location of the earlier declaration a duplicate collides with.
    pub fn first_span(&self) -> Option<Span> {
        match self {
            ModelError::DuplicateComponent { first, .. }
            | ModelError::DuplicatePort { first, .. }
            | ModelError::DuplicateInstance { first, .. }
            | ModelError::DuplicateExpandedChild { first, .. } => Some(*first),
            ModelError::UnknownExpansionType { .. } => None,
        }
    }
}

/// Collects components and expansion trees and turns them into a [`Model`].
///
/// Building:
/// - checks that component names, port names (per direction), instance
///   names and expanded child names are unique;
/// - attaches every connector to its owning scope (simple connectors belong
///   to the scope of the component declaring the instance);
/// - numbers constant connectors `CONSTANTPORT1`, `CONSTANTPORT2`, ... in
///   declaration order;
/// - flattens expansion trees into the arena and copies each node's ports
///   from its component type.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    components: Vec<Component>,
    expansions: Vec<ExpandedInstance>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component type.
    pub fn component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Add the root of an expanded instance tree.
    pub fn expansion(mut self, root: ExpandedInstance) -> Self {
        self.expansions.push(root);
        self
    }

    /// Build the model.
    ///
    /// # Errors
    ///
    /// Returns the first [`ModelError`] found, checking components in
    /// declaration order before expansion trees.
    pub fn build(self) -> Result<Model, ModelError> {
        let Self {
            mut components,
            expansions,
        } = self;

        let mut constants = 0;
        let mut seen: HashMap<Id, Span> = HashMap::new();

        for (idx, component) in components.iter_mut().enumerate() {
            if let Some(&first) = seen.get(&component.name()) {
                return Err(ModelError::DuplicateComponent {
                    name: component.name(),
                    span: component.span(),
                    first,
                });
            }
            seen.insert(component.name(), component.span());

            check_component(component)?;

            let scope = ScopeId::Component(ComponentId(idx));
            attach_all(component.connectors_mut(), scope, &mut constants);
            for instance in component.instances_mut() {
                attach_all(instance.connectors_mut(), scope, &mut constants);
            }
            trace!(component:% = component.name(), scope:% = scope; "Component registered");
        }

        let mut arena = Vec::new();
        for root in expansions {
            flatten(root, None, &components, &mut arena, &mut constants)?;
        }

        debug!(
            components = components.len(),
            expanded = arena.len(),
            constants = constants;
            "Model built"
        );

        Ok(Model::from_parts(components, arena))
    }
}

fn check_component(component: &Component) -> Result<(), ModelError> {
    let mut ports: HashMap<(Id, Direction), Span> = HashMap::new();
    for port in component.ports() {
        if let Some(&first) = ports.get(&(port.name(), port.direction())) {
            return Err(ModelError::DuplicatePort {
                component: component.name(),
                port: port.name(),
                direction: port.direction(),
                span: port.span(),
                first,
            });
        }
        ports.insert((port.name(), port.direction()), port.span());
    }

    let mut instances: HashMap<Id, Span> = HashMap::new();
    for instance in component.instances() {
        if let Some(&first) = instances.get(&instance.name()) {
            return Err(ModelError::DuplicateInstance {
                component: component.name(),
                instance: instance.name(),
                span: instance.span(),
                first,
            });
        }
        instances.insert(instance.name(), instance.span());
    }

    Ok(())
}

fn attach_all(connectors: &mut [Connector], scope: ScopeId, constants: &mut usize) {
    for connector in connectors {
        connector.attach(scope);
        if connector.is_constant() {
            *constants += 1;
            connector.number_constant(*constants);
        }
    }
}

/// Push `node` and its subtree into `arena`, parent before children.
fn flatten(
    mut node: ExpandedInstance,
    parent: Option<ExpandedId>,
    components: &[Component],
    arena: &mut Vec<ExpandedInstance>,
    constants: &mut usize,
) -> Result<ExpandedId, ModelError> {
    let component = components
        .iter()
        .find(|component| component.name() == node.type_name())
        .ok_or_else(|| ModelError::UnknownExpansionType {
            instance: node.name(),
            type_name: node.type_name(),
            span: node.span(),
        })?;

    let id = ExpandedId(arena.len());
    node.materialize(component.ports(), parent);
    attach_all(node.connectors_mut(), ScopeId::Expanded(id), constants);

    let pending = node.take_pending_children();
    let parent_name = node.name();
    arena.push(node);

    let mut seen: HashMap<Id, Span> = HashMap::new();
    let mut children = Vec::with_capacity(pending.len());
    for child in pending {
        if let Some(&first) = seen.get(&child.name()) {
            return Err(ModelError::DuplicateExpandedChild {
                parent: parent_name,
                child: child.name(),
                span: child.span(),
                first,
            });
        }
        seen.insert(child.name(), child.span());
        children.push(flatten(child, Some(id), components, arena, constants)?);
    }
    arena[id.0].set_children(children);

    Ok(id)
}
