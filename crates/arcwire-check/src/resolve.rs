//! Resolution of connector endpoints to the ports they denote.
//!
//! A reference is resolved against the scope declaring the connector by
//! trying a fixed list of strategies in order; the first one that finds a
//! port wins:
//!
//! 1. **Boundary**: the reference names a port of the symbol spanning the
//!    scope, either bare (`a`) or qualified with that symbol's own name
//!    (`Outer.a`).
//! 2. **Expanded**: the scope is spanned by an expanded instance; `s.x`
//!    descends into the child `s` of the materialized tree and looks up `x`
//!    there. This takes precedence over the declared structure because the
//!    expanded tree is what actually exists.
//! 3. **Declared**: the scope is spanned by a component; `s.x` finds the
//!    instance `s` and looks up `x` on the component type it instantiates.
//!
//! A strategy that does not apply to the reference or scope is skipped. If
//! none finds a port, the first failure is returned. Resolution is pure
//! lookup: nothing is created or mutated, so resolving the same reference in
//! the same scope always gives the same answer.
//!
//! [`Resolver::resolve_port`] matches names only. The connector methods also
//! match direction: a source must be an incoming port of the enclosing
//! boundary or an outgoing port of a subcomponent, and a target the reverse.
//! A component may declare the same name once in each direction, and the
//! connector end is what tells the two apart.

use log::trace;
use thiserror::Error;

use arcwire_core::{
    identifier::Id,
    model::{
        Connector, Direction, Instance, Model, Port, ScopeId, Spanning, Symbol, SymbolKind,
        SymbolTable,
    },
    qualified::{NameError, QualifiedName},
};

/// Why a port reference did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("no port `{raw_name}` found in `{scope}`")]
    PortNotFound { raw_name: String, scope: String },

    #[error("no {expected} port `{raw_name}` found in `{scope}`")]
    WrongDirection {
        raw_name: String,
        expected: Direction,
        scope: String,
    },

    #[error("malformed port reference `{raw_name}`: {source}")]
    MalformedName {
        raw_name: String,
        #[source]
        source: NameError,
    },

    #[error("no instance `{instance}` in `{scope}`")]
    UnknownInstance { instance: String, scope: String },

    #[error("instance `{instance}` refers to undeclared component type `{type_name}`")]
    UnknownComponentType { instance: Id, type_name: Id },

    #[error("cannot resolve `{raw_name}`: scope {scope} does not exist")]
    MissingScope { raw_name: String, scope: ScopeId },

    #[error(
        "cannot resolve `{raw_name}`: connector does not belong to a component or expanded instance"
    )]
    DetachedConnector { raw_name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Boundary,
    Expanded,
    Declared,
}

const STRATEGIES: [Strategy; 3] = [Strategy::Boundary, Strategy::Expanded, Strategy::Declared];

/// The connector end a reference sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Source,
    Target,
}

impl End {
    /// Required direction of a port on the enclosing boundary.
    fn boundary(self) -> Direction {
        match self {
            End::Source => Direction::In,
            End::Target => Direction::Out,
        }
    }

    /// Required direction of a port on a subcomponent.
    fn subcomponent(self) -> Direction {
        match self {
            End::Source => Direction::Out,
            End::Target => Direction::In,
        }
    }
}

/// A parsed reference being resolved.
#[derive(Debug, Clone, Copy)]
struct Reference<'a> {
    raw: &'a str,
    name: QualifiedName<'a>,
    end: Option<End>,
}

enum Lookup<'m> {
    Found(&'m Port),
    NotApplicable,
    Failed(ResolutionError),
}

/// Resolves port references against a [`SymbolTable`].
///
/// # Examples
///
/// ```
/// use arcwire_check::Resolver;
/// use arcwire_core::model::{Component, Connector, Instance, Model};
///
/// let model = Model::builder()
///     .component(Component::new("Inner").with_incoming("x"))
///     .component(
///         Component::new("Outer")
///             .with_incoming("a")
///             .with_instance(Instance::new("s", "Inner"))
///             .with_connector(Connector::new("a", "s.x")),
///     )
///     .build()
///     .unwrap();
///
/// let resolver = Resolver::new(&model);
/// let (_, outer) = model.components().nth(1).unwrap();
/// let wire = &outer.connectors()[0];
///
/// assert_eq!(resolver.source_port(wire).unwrap().name(), "a");
/// assert_eq!(resolver.target_port(wire).unwrap().name(), "x");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'m, S: SymbolTable + ?Sized = Model> {
    symbols: &'m S,
}

impl<'m, S: SymbolTable + ?Sized> Resolver<'m, S> {
    pub fn new(symbols: &'m S) -> Self {
        Self { symbols }
    }

    /// Resolve `raw_name` in `scope` to a port of either direction.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::MissingScope`] if `scope` does not exist,
    /// [`ResolutionError::MalformedName`] if `raw_name` cannot be split, and
    /// otherwise the first failure reported by an applicable strategy.
    pub fn resolve_port(&self, raw_name: &str, scope: ScopeId) -> Result<&'m Port, ResolutionError> {
        self.lookup(raw_name, scope, None)
    }

    /// The port a connector's source denotes.
    ///
    /// Constant connectors are never resolved: their source is the synthetic
    /// constant port.
    pub fn source_port(&self, connector: &'m Connector) -> Result<&'m Port, ResolutionError> {
        if let Some(port) = connector.constant_port() {
            return Ok(port);
        }
        self.resolve_endpoint(connector.source(), connector, End::Source)
    }

    /// The port a connector's target denotes.
    pub fn target_port(&self, connector: &Connector) -> Result<&'m Port, ResolutionError> {
        self.resolve_endpoint(connector.target(), connector, End::Target)
    }

    /// The port the source of a simple connector declared on `instance`
    /// denotes. The instance-relative source is qualified with the instance
    /// name and resolved in the enclosing component.
    pub fn simple_source_port(
        &self,
        instance: &Instance,
        connector: &'m Connector,
    ) -> Result<&'m Port, ResolutionError> {
        if let Some(port) = connector.constant_port() {
            return Ok(port);
        }
        let qualified = QualifiedName::qualify(instance.name(), connector.source());
        self.resolve_endpoint(&qualified, connector, End::Source)
    }

    fn resolve_endpoint(
        &self,
        raw_name: &str,
        connector: &Connector,
        end: End,
    ) -> Result<&'m Port, ResolutionError> {
        let scope = connector
            .scope()
            .ok_or_else(|| ResolutionError::DetachedConnector {
                raw_name: raw_name.to_string(),
            })?;
        self.lookup(raw_name, scope, Some(end))
    }

    fn lookup(
        &self,
        raw_name: &str,
        scope: ScopeId,
        end: Option<End>,
    ) -> Result<&'m Port, ResolutionError> {
        let spanning = self
            .symbols
            .spanning(scope)
            .ok_or_else(|| ResolutionError::MissingScope {
                raw_name: raw_name.to_string(),
                scope,
            })?;
        let name = QualifiedName::parse(raw_name).map_err(|source| {
            ResolutionError::MalformedName {
                raw_name: raw_name.to_string(),
                source,
            }
        })?;
        let reference = Reference {
            raw: raw_name,
            name,
            end,
        };

        let mut failure = None;
        for strategy in STRATEGIES {
            match self.apply(strategy, reference, scope, spanning) {
                Lookup::Found(port) => {
                    trace!(name = raw_name, strategy:? = strategy, end:? = end; "Port resolved");
                    return Ok(port);
                }
                Lookup::NotApplicable => {}
                Lookup::Failed(err) => {
                    trace!(name = raw_name, strategy:? = strategy, err:% = err; "Strategy failed");
                    failure.get_or_insert(err);
                }
            }
        }

        Err(failure.unwrap_or_else(|| ResolutionError::PortNotFound {
            raw_name: raw_name.to_string(),
            scope: spanning.name().to_string(),
        }))
    }

    fn apply(
        &self,
        strategy: Strategy,
        reference: Reference<'_>,
        scope: ScopeId,
        spanning: Spanning<'m>,
    ) -> Lookup<'m> {
        match strategy {
            Strategy::Boundary => self.boundary_port(reference, scope, spanning),
            Strategy::Expanded => self.expanded_port(reference, scope, spanning),
            Strategy::Declared => self.declared_port(reference, scope, spanning),
        }
    }

    fn boundary_port(
        &self,
        reference: Reference<'_>,
        scope: ScopeId,
        spanning: Spanning<'m>,
    ) -> Lookup<'m> {
        if let Some(qualifier) = reference.name.instance()
            && spanning.name() != qualifier
        {
            return Lookup::NotApplicable;
        }
        let direction = reference.end.map(End::boundary);
        self.port_in(reference, direction, scope, spanning.name())
    }

    fn expanded_port(
        &self,
        reference: Reference<'_>,
        scope: ScopeId,
        spanning: Spanning<'m>,
    ) -> Lookup<'m> {
        if !spanning.is_expanded() {
            return Lookup::NotApplicable;
        }
        let Some(instance) = reference.name.instance() else {
            let direction = reference.end.map(End::boundary);
            return self.port_in(reference, direction, scope, spanning.name());
        };

        match self
            .symbols
            .resolve(instance, SymbolKind::ExpandedInstance, scope)
            .and_then(Symbol::as_expanded)
        {
            Some((child, expanded)) => self.port_in(
                reference,
                reference.end.map(End::subcomponent),
                ScopeId::Expanded(child),
                expanded.name(),
            ),
            None => Lookup::Failed(ResolutionError::UnknownInstance {
                instance: instance.to_string(),
                scope: spanning.name().to_string(),
            }),
        }
    }

    fn declared_port(
        &self,
        reference: Reference<'_>,
        scope: ScopeId,
        spanning: Spanning<'m>,
    ) -> Lookup<'m> {
        if spanning.is_expanded() {
            return Lookup::NotApplicable;
        }
        let Some(instance_name) = reference.name.instance() else {
            return Lookup::Failed(ResolutionError::PortNotFound {
                raw_name: reference.raw.to_string(),
                scope: spanning.name().to_string(),
            });
        };

        let Some(instance) = self
            .symbols
            .resolve(instance_name, SymbolKind::Instance, scope)
            .and_then(Symbol::as_instance)
        else {
            return Lookup::Failed(ResolutionError::UnknownInstance {
                instance: instance_name.to_string(),
                scope: spanning.name().to_string(),
            });
        };

        let Some(type_scope) = self.symbols.type_scope(instance) else {
            return Lookup::Failed(ResolutionError::UnknownComponentType {
                instance: instance.name(),
                type_name: instance.type_name(),
            });
        };

        let direction = reference.end.map(End::subcomponent);
        self.port_in(reference, direction, type_scope, instance.type_name())
    }

    /// Look up the port part of `reference` directly in `scope`.
    ///
    /// A name that exists only in the other direction is reported as
    /// [`ResolutionError::WrongDirection`].
    fn port_in(
        &self,
        reference: Reference<'_>,
        direction: Option<Direction>,
        scope: ScopeId,
        owner: Id,
    ) -> Lookup<'m> {
        let port = reference.name.port();
        let kind = direction.map_or(SymbolKind::Port, SymbolKind::DirectedPort);
        if let Some(found) = self
            .symbols
            .resolve(port, kind, scope)
            .and_then(Symbol::as_port)
        {
            return Lookup::Found(found);
        }

        match direction {
            Some(expected) if self.symbols.resolve(port, SymbolKind::Port, scope).is_some() => {
                Lookup::Failed(ResolutionError::WrongDirection {
                    raw_name: reference.raw.to_string(),
                    expected,
                    scope: owner.to_string(),
                })
            }
            _ => Lookup::Failed(ResolutionError::PortNotFound {
                raw_name: reference.raw.to_string(),
                scope: owner.to_string(),
            }),
        }
    }
}
