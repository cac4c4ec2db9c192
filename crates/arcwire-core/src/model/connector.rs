//! Connectors: declared wires between two port references.

use std::sync::OnceLock;

use crate::{
    identifier::Id,
    model::{ScopeId, port::CONSTANT_PORT_PREFIX, port::Port},
    span::Span,
};

/// A wire from `source` to `target`.
///
/// Both endpoints are relative-qualified from the perspective of the scope
/// that declares the connector: `instance.port` or a bare `port`. The
/// connector does not own the ports it names; they are looked up through a
/// [`SymbolTable`](crate::model::SymbolTable).
///
/// A constant connector has no wired source. Its source is a synthetic
/// constant port named `CONSTANTPORT<n>`, assigned when the model is built
/// and materialized on first use by [`Connector::constant_port`].
///
/// # Examples
///
/// ```
/// use arcwire_core::model::Connector;
///
/// let wire = Connector::new("a", "s.x");
/// assert_eq!(wire.source(), "a");
/// assert_eq!(wire.target(), "s.x");
/// assert!(wire.scope().is_none());
///
/// let literal = Connector::constant("1", "s.x");
/// assert!(literal.is_constant());
/// assert_eq!(literal.constant_port().unwrap().constant_value(), Some("1"));
/// ```
#[derive(Debug, Clone)]
pub struct Connector {
    source: String,
    target: String,
    constant: Option<String>,
    constant_port: OnceLock<Port>,
    scope: Option<ScopeId>,
    span: Span,
}

impl Connector {
    /// Create a connector between two port references.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            constant: None,
            constant_port: OnceLock::new(),
            scope: None,
            span: Span::default(),
        }
    }

    /// Create a connector feeding a literal value into `target`.
    pub fn constant(value: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            constant: Some(value.into()),
            ..Self::new(CONSTANT_PORT_PREFIX, target)
        }
    }

    /// Attach a source location.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// The source reference. For constant connectors this is the name of the
    /// synthetic constant port.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_constant(&self) -> bool {
        self.constant.is_some()
    }

    pub fn constant_value(&self) -> Option<&str> {
        self.constant.as_deref()
    }

    /// The scope that declares this connector, or `None` if it was never
    /// attached to a model.
    pub fn scope(&self) -> Option<ScopeId> {
        self.scope
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// The synthetic source port of a constant connector.
    ///
    /// Computed once and memoized; returns `None` for wired connectors.
    pub fn constant_port(&self) -> Option<&Port> {
        let value = self.constant.as_deref()?;
        Some(
            self.constant_port
                .get_or_init(|| Port::constant(Id::new(&self.source), value, self.span)),
        )
    }

    pub(crate) fn attach(&mut self, scope: ScopeId) {
        self.scope = Some(scope);
    }

    pub(crate) fn number_constant(&mut self, index: usize) {
        if self.is_constant() {
            self.source = format!("{CONSTANT_PORT_PREFIX}{index}");
            self.constant_port = OnceLock::new();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentId;

    #[test]
    fn test_wired_connector_has_no_constant_port() {
        let connector = Connector::new("s.y", "b");

        assert!(!connector.is_constant());
        assert!(connector.constant_port().is_none());
    }

    #[test]
    fn test_constant_port_is_memoized() {
        let mut connector = Connector::constant("true", "s.enabled");
        connector.number_constant(7);

        let first = connector.constant_port().unwrap() as *const Port;
        let second = connector.constant_port().unwrap() as *const Port;

        assert_eq!(first, second);
        assert_eq!(connector.source(), "CONSTANTPORT7");
        assert_eq!(connector.constant_port().unwrap().name(), "CONSTANTPORT7");
    }

    #[test]
    fn test_number_constant_ignores_wired_connectors() {
        let mut connector = Connector::new("a", "s.x");
        connector.number_constant(1);

        assert_eq!(connector.source(), "a");
    }

    #[test]
    fn test_attach_sets_scope() {
        let mut connector = Connector::new("a", "s.x");
        connector.attach(ScopeId::Component(ComponentId(3)));

        assert_eq!(connector.scope(), Some(ScopeId::Component(ComponentId(3))));
    }
}
