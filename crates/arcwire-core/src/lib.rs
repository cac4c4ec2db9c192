//! Arcwire Core Types and Definitions
//!
//! This crate provides the foundational types for describing hierarchical
//! component architectures. It includes:
//!
//! - **Identifiers**: String-interned names ([`identifier::Id`])
//! - **Spans**: Source locations of model elements ([`span::Span`])
//! - **Qualified names**: The single routine splitting `instance.port`
//!   references ([`qualified::QualifiedName`])
//! - **Model**: Components, ports, instances, connectors and expanded
//!   instance trees stored in an arena, plus the [`model::SymbolTable`]
//!   lookup capability ([`model`] module)

pub mod identifier;
pub mod model;
pub mod qualified;
pub mod span;
