//! Resolvers that turn records into typed values
//!
//! [`for_type`] builds a resolver for one type; [`builder`] starts a resolver
//! that first picks a subtype from a discriminator column. Both are built
//! eagerly: every declaration error surfaces here, before any row is mapped.

pub mod builder;
pub mod discriminated;
pub mod single;

pub use builder::ObjectBuilder;
pub use discriminated::{DiscriminatedResolver, DiscriminatedResolverBuilder};
pub use single::SingleTypeResolver;

use crate::common::traits::SchemaSource;
use crate::config::MapperConfig;
use crate::error::Result;

/// Resolver for a single type
pub fn for_type<T: SchemaSource>() -> Result<SingleTypeResolver<T>> {
    SingleTypeResolver::for_type()
}

/// Resolver for a single type with a custom configuration
pub fn for_type_with_config<T: SchemaSource>(
    config: &MapperConfig,
) -> Result<SingleTypeResolver<T>> {
    SingleTypeResolver::for_type_with_config(config)
}

/// Builder for a resolver that dispatches on `column`
pub fn builder<P: 'static>(column: impl Into<String>) -> DiscriminatedResolverBuilder<P> {
    DiscriminatedResolverBuilder::new(column)
}
