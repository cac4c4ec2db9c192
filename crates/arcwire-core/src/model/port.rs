//! Ports: the named, directed interaction points on a component boundary.

use std::fmt;

use crate::{identifier::Id, qualified::QualifiedName, span::Span};

/// Name prefix reserved for synthetic constant ports.
///
/// Constant connectors get a source port named `CONSTANTPORT<n>`, and a
/// subcomponent port whose name carries this prefix is treated as fed by a
/// literal value.
pub const CONSTANT_PORT_PREFIX: &str = "CONSTANTPORT";

/// Direction of a port relative to its owning component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    In,
    Out,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::In => write!(f, "incoming"),
            Direction::Out => write!(f, "outgoing"),
        }
    }
}

/// A port declared by a component type, or a synthetic constant port.
///
/// # Examples
///
/// ```
/// use arcwire_core::model::{Direction, Port};
///
/// let port = Port::incoming("speed");
/// assert_eq!(port.name(), "speed");
/// assert_eq!(port.direction(), Direction::In);
/// assert!(!port.is_constant());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    name: Id,
    direction: Direction,
    constant: Option<String>,
    span: Span,
}

impl Port {
    /// Create a port with the given direction.
    pub fn new(name: &str, direction: Direction) -> Self {
        Self {
            name: Id::new(name),
            direction,
            constant: None,
            span: Span::default(),
        }
    }

    /// Create an incoming port.
    pub fn incoming(name: &str) -> Self {
        Self::new(name, Direction::In)
    }

    /// Create an outgoing port.
    pub fn outgoing(name: &str) -> Self {
        Self::new(name, Direction::Out)
    }

    /// Create a synthetic constant port carrying a literal value.
    ///
    /// Constant ports act as the source of a constant connector, so they are
    /// always outgoing.
    pub fn constant(name: Id, value: impl Into<String>, span: Span) -> Self {
        Self {
            name,
            direction: Direction::Out,
            constant: Some(value.into()),
            span,
        }
    }

    /// Attach a source location.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_incoming(&self) -> bool {
        self.direction == Direction::In
    }

    pub fn is_outgoing(&self) -> bool {
        self.direction == Direction::Out
    }

    /// Whether this port is a literal source rather than a wired port.
    pub fn is_constant(&self) -> bool {
        self.constant.is_some()
    }

    /// The literal value of a constant port.
    pub fn constant_value(&self) -> Option<&str> {
        self.constant.as_deref()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Check the constant port naming convention.
    ///
    /// Accepts bare or qualified names; only the port segment is inspected.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcwire_core::model::Port;
    ///
    /// assert!(Port::is_constant_name("CONSTANTPORT1"));
    /// assert!(Port::is_constant_name("s.CONSTANTPORT2"));
    /// assert!(!Port::is_constant_name("s.x"));
    /// ```
    pub fn is_constant_name(name: &str) -> bool {
        QualifiedName::parse(name)
            .map(|name| name.port().starts_with(CONSTANT_PORT_PREFIX))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions() {
        assert!(Port::incoming("a").is_incoming());
        assert!(Port::outgoing("b").is_outgoing());
        assert!(!Port::outgoing("b").is_incoming());
    }

    #[test]
    fn test_constant_port() {
        let port = Port::constant(Id::new("CONSTANTPORT3"), "42", Span::new(4..6));

        assert!(port.is_constant());
        assert!(port.is_outgoing());
        assert_eq!(port.constant_value(), Some("42"));
        assert_eq!(port.span(), Span::new(4..6));
    }

    #[test]
    fn test_constant_name_convention() {
        assert!(Port::is_constant_name("CONSTANTPORT"));
        assert!(Port::is_constant_name("sub.CONSTANTPORT17"));
        assert!(!Port::is_constant_name("constantport1"));
        assert!(!Port::is_constant_name("CONSTANTPORT.x"));
        assert!(!Port::is_constant_name(""));
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::In.to_string(), "incoming");
        assert_eq!(Direction::Out.to_string(), "outgoing");
    }
}
