//! Error and diagnostic system for the Arcwire checks.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating multiple findings
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single finding about the model with optional error code, multiple source
//! locations, and help text. Multiple diagnostics are wrapped in [`CheckError`]
//! when a check run finds errors.
//!
//! # Example
//!
//! ```
//! # use arcwire_check::error::{Diagnostic, ErrorCode};
//! # use arcwire_core::span::Span;
//!
//! let instance = Span::new(100..120);
//! let component = Span::new(50..70);
//!
//! let diag = Diagnostic::error("port `s.x` of subcomponent `Outer.s` is not used")
//!     .with_code(ErrorCode::AC008)
//!     .with_label(instance, "declared here")
//!     .with_secondary_label(component, "in this component")
//!     .with_help("connect `s.x` from `Outer` or from a simple connector");
//! ```

mod check_error;
mod collector;
mod diagnostic;
mod error_code;
mod label;
mod severity;

pub use check_error::CheckError;
pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use severity::Severity;
