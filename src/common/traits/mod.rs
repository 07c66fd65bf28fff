//! Common traits used across the codebase
//!
//! This module defines the seams between the resolver core and its
//! collaborators: the type metadata that declares factories, and the
//! per-row mapping surface every resolver exposes.

pub mod row_mapper;
pub mod schema_source;

// Re-export core traits for convenience
pub use row_mapper::RowMapper;
pub use schema_source::SchemaSource;
