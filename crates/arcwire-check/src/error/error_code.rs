//! Error codes for the Arcwire diagnostic system.
//!
//! Codes keep the numbering of the architecture language's context
//! conditions:
//! - `AC008`/`AC009` - Unconnected subcomponent ports
//! - `AC012`/`AC013` - Connector endpoints that resolve to no port

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Connectivity (AC008-AC009)
    // =========================================================================
    /// Incoming subcomponent port not used.
    ///
    /// No connector of the enclosing component, and no simple connector of
    /// any of its instances, targets this incoming port.
    AC008,

    /// Outgoing subcomponent port not used.
    ///
    /// No connector of the enclosing component, and no simple connector of
    /// any of its instances, has this outgoing port as its source.
    AC009,

    // =========================================================================
    // Resolution (AC012-AC013)
    // =========================================================================
    /// Connector source not resolvable.
    ///
    /// The source reference of a connector denotes no port.
    AC012,

    /// Connector target not resolvable.
    ///
    /// The target reference of a connector denotes no port.
    AC013,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "AC008").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::AC008 => "AC008",
            ErrorCode::AC009 => "AC009",
            ErrorCode::AC012 => "AC012",
            ErrorCode::AC013 => "AC013",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::AC008 => "incoming subcomponent port not used",
            ErrorCode::AC009 => "outgoing subcomponent port not used",
            ErrorCode::AC012 => "connector source not resolvable",
            ErrorCode::AC013 => "connector target not resolvable",
        }
    }

    /// Whether this code reports an unconnected port.
    pub fn is_unused_port(&self) -> bool {
        matches!(self, ErrorCode::AC008 | ErrorCode::AC009)
    }

    /// Whether this code reports an unresolvable connector endpoint.
    pub fn is_unresolved_endpoint(&self) -> bool {
        matches!(self, ErrorCode::AC012 | ErrorCode::AC013)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
