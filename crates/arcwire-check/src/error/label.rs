//! Labeled source spans for diagnostic messages.

use arcwire_core::span::Span;

/// A message attached to a location in the model source.
///
/// - **Primary labels** mark the element the finding is about, e.g. the
///   instance whose port is unused or the connector that does not resolve.
/// - **Secondary labels** add context, e.g. the enclosing component.
///
/// ```text
/// error[AC008]: port `s.x` of subcomponent `Outer.s` is not used
///    |
///  9 |   name = "s"
///    |          ^^^ instance declared here
///    |
///  3 | name = "Outer"
///    |        ------- in component `Outer`
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_label() {
        let label = Label::primary(Span::new(10..20), "instance declared here");

        assert_eq!(label.span(), Span::new(10..20));
        assert_eq!(label.message(), "instance declared here");
        assert!(label.is_primary());
        assert!(!label.is_secondary());
    }

    #[test]
    fn test_secondary_label() {
        let label = Label::secondary(Span::new(5..15), "in component `Outer`");

        assert_eq!(label.span().start(), 5);
        assert!(label.is_secondary());
    }
}
