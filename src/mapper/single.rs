//! Resolver for one concrete type

use std::fmt;
use std::sync::Arc;

use crate::common::traits::{RowMapper, SchemaSource};
use crate::config::MapperConfig;
use crate::error::Result;
use crate::mapper::builder::ObjectBuilder;
use crate::record::{ColumnNormalizer, Record};
use crate::schema::{ConstructionSchema, FactoryDecl, SchemaRegistry};

/// Maps records to `T` by resolving a schema, then building through it
pub struct SingleTypeResolver<T> {
    registry: SchemaRegistry<T>,
    normalizer: Arc<dyn ColumnNormalizer>,
}

impl<T: SchemaSource> SingleTypeResolver<T> {
    /// Resolver for a type that declares its own factories
    pub fn for_type() -> Result<Self> {
        Self::for_type_with_config(&MapperConfig::default())
    }

    pub fn for_type_with_config(config: &MapperConfig) -> Result<Self> {
        Self::from_decls(T::type_name(), T::factories(), config)
    }
}

impl<T> SingleTypeResolver<T> {
    /// Resolver from explicitly supplied factory declarations
    pub fn from_decls(
        type_name: impl Into<String>,
        decls: Vec<FactoryDecl<T>>,
        config: &MapperConfig,
    ) -> Result<Self> {
        let registry = SchemaRegistry::from_decls(type_name, decls, config)?;
        Ok(Self {
            registry,
            normalizer: Arc::new(config.case_fold),
        })
    }

    /// Replace the column normalizer used by [`RowMapper::map_columns`]
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: impl ColumnNormalizer + 'static) -> Self {
        self.normalizer = Arc::new(normalizer);
        self
    }

    #[must_use]
    pub fn registry(&self) -> &SchemaRegistry<T> {
        &self.registry
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        self.registry.type_name()
    }

    /// Schema that `record` would be built with
    pub fn resolve(&self, record: &Record) -> Result<&ConstructionSchema<T>> {
        self.registry.resolve(record)
    }
}

impl<T> RowMapper<T> for SingleTypeResolver<T> {
    fn map_record(&self, record: &Record) -> Result<T> {
        let schema = self.registry.resolve(record)?;
        ObjectBuilder::build(schema, record)
    }

    fn normalizer(&self) -> &dyn ColumnNormalizer {
        self.normalizer.as_ref()
    }
}

impl<T> fmt::Debug for SingleTypeResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleTypeResolver")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
