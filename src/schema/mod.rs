//! Construction schemas: extraction from factory declarations, and the
//! per-type registry that resolves a record to one of them.

pub mod construction;
pub mod extractor;
pub mod registry;

// Re-export the main schema types for easier access
pub use construction::{ConstructionSchema, Factory, FactoryDecl};
pub use extractor::SchemaExtractor;
pub use registry::SchemaRegistry;
