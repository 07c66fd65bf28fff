//! A Rust library for mapping string-keyed rows onto immutable types through
//! named constructor schemas, with discriminator-based subtype dispatch.
//!
//! A type lists its factories and names each parameter after a column. For
//! every row the resolver picks the factory with the most parameters whose
//! names are all present as keys, and calls it with the row's values in
//! parameter order.
//!
//! ```
//! use named_constructor::{named_constructors, mapper, Record, RowMapper};
//!
//! #[derive(Debug, PartialEq)]
//! struct Thing {
//!     id: i64,
//!     name: Option<String>,
//! }
//!
//! #[named_constructors]
//! impl Thing {
//!     fn new(#[named("id")] id: i64, #[named("name")] name: Option<String>) -> Self {
//!         Self { id, name }
//!     }
//!
//!     fn anonymous(#[named("id")] id: i64) -> Self {
//!         Self { id, name: None }
//!     }
//! }
//!
//! let resolver = mapper::for_type::<Thing>().unwrap();
//! let row = Record::new().with("id", 1i64).with("extra", true);
//! assert_eq!(resolver.map_record(&row).unwrap(), Thing { id: 1, name: None });
//! ```

extern crate self as named_constructor;

pub mod common;
pub mod config;
pub mod error;
pub mod mapper;
pub mod record;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use common::traits::{RowMapper, SchemaSource};
pub use config::{AmbiguityPolicy, CaseFold, MapperConfig};
pub use error::{BoxError, ExtractionIssue, MapperError, Result};
pub use record::{Arguments, ColumnNormalizer, FromValue, Record, Value, ValueError};

// Schemas and resolvers
pub use mapper::{DiscriminatedResolver, DiscriminatedResolverBuilder, ObjectBuilder, SingleTypeResolver};
pub use schema::{ConstructionSchema, Factory, FactoryDecl, SchemaExtractor, SchemaRegistry};

// Procedural macros
pub use named_constructor_macros::named_constructors;
