//! Parsing of dot-qualified port references.
//!
//! Connector endpoints are written either as a bare `port` (a boundary port of
//! the declaring scope) or as `instance.port`. Every consumer splits names
//! through [`QualifiedName`] so the rules stay in one place:
//!
//! - the name is split on the **first** `.`;
//! - neither segment may be empty;
//! - everything after the first `.` is the port segment, so `a.b.c` has
//!   instance `a` and port `b.c` (which no port can be named, so such a
//!   reference never resolves).

use std::fmt;

use thiserror::Error;

/// Separator between the instance and port segments.
pub const SEPARATOR: char = '.';

/// Errors produced while splitting a qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name is empty")]
    Empty,

    #[error("name `{0}` has an empty segment")]
    EmptySegment(String),
}

/// A port reference split into its optional instance segment and port segment.
///
/// # Examples
///
/// ```
/// use arcwire_core::qualified::QualifiedName;
///
/// let name = QualifiedName::parse("s.x").unwrap();
/// assert_eq!(name.instance(), Some("s"));
/// assert_eq!(name.port(), "x");
///
/// let bare = QualifiedName::parse("speed").unwrap();
/// assert_eq!(bare.instance(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedName<'a> {
    instance: Option<&'a str>,
    port: &'a str,
}

impl<'a> QualifiedName<'a> {
    /// Split `raw` into instance and port segments.
    ///
    /// # Errors
    ///
    /// Returns [`NameError::Empty`] for an empty name and
    /// [`NameError::EmptySegment`] when either side of the first `.` is empty.
    pub fn parse(raw: &'a str) -> Result<Self, NameError> {
        if raw.is_empty() {
            return Err(NameError::Empty);
        }

        match raw.split_once(SEPARATOR) {
            Some((instance, port)) if instance.is_empty() || port.is_empty() => {
                Err(NameError::EmptySegment(raw.to_string()))
            }
            Some((instance, port)) => Ok(Self {
                instance: Some(instance),
                port,
            }),
            None => Ok(Self {
                instance: None,
                port: raw,
            }),
        }
    }

    /// The instance segment, if the name is qualified.
    pub fn instance(&self) -> Option<&'a str> {
        self.instance
    }

    /// The port segment.
    pub fn port(&self) -> &'a str {
        self.port
    }

    /// Whether the name has an instance segment.
    pub fn is_qualified(&self) -> bool {
        self.instance.is_some()
    }

    /// Build the relative-qualified form `instance.port`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcwire_core::qualified::QualifiedName;
    ///
    /// assert_eq!(QualifiedName::qualify("s", "x"), "s.x");
    /// ```
    pub fn qualify(instance: impl fmt::Display, port: impl fmt::Display) -> String {
        format!("{instance}{SEPARATOR}{port}")
    }
}

impl fmt::Display for QualifiedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.instance {
            Some(instance) => write!(f, "{instance}{SEPARATOR}{}", self.port),
            None => write!(f, "{}", self.port),
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn segment_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z_][A-Za-z0-9_]{0,12}"
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Qualifying two segments and splitting the result gives the segments back.
    fn check_qualify_then_parse(instance: &str, port: &str) -> Result<(), TestCaseError> {
        let raw = QualifiedName::qualify(instance, port);
        let name = QualifiedName::parse(&raw).map_err(|err| TestCaseError::fail(err.to_string()))?;

        prop_assert_eq!(name.instance(), Some(instance));
        prop_assert_eq!(name.port(), port);
        Ok(())
    }

    /// Parsing never panics and a successful parse never yields an empty segment.
    fn check_parse_segments_non_empty(raw: &str) -> Result<(), TestCaseError> {
        if let Ok(name) = QualifiedName::parse(raw) {
            prop_assert!(!name.port().is_empty());
            prop_assert!(name.instance().is_none_or(|instance| !instance.is_empty()));
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn qualify_then_parse(instance in segment_strategy(), port in segment_strategy()) {
            check_qualify_then_parse(&instance, &port)?;
        }

        #[test]
        fn parse_segments_non_empty(raw in "[a-z.]{0,8}") {
            check_parse_segments_non_empty(&raw)?;
        }
    }
}
