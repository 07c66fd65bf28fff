//! Subtype dispatch on a discriminator column
//!
//! The discriminator value of a record picks which subtype's registry to
//! search; schema resolution then proceeds inside that registry exactly as for
//! a single type.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::common::traits::{RowMapper, SchemaSource};
use crate::config::{CaseFold, MapperConfig};
use crate::error::{MapperError, Result};
use crate::mapper::single::SingleTypeResolver;
use crate::record::{ColumnNormalizer, Record, Value};
use crate::utils::logging::log_dispatch;

/// Single-type resolver of a subtype, converting its output to the parent
struct Upcast<S, F> {
    resolver: SingleTypeResolver<S>,
    convert: F,
}

impl<S, P, F> RowMapper<P> for Upcast<S, F>
where
    F: Fn(S) -> P + Send + Sync,
{
    fn map_record(&self, record: &Record) -> Result<P> {
        self.resolver.map_record(record).map(&self.convert)
    }

    fn normalizer(&self) -> &dyn ColumnNormalizer {
        self.resolver.normalizer()
    }
}

struct Subtype<P> {
    name: String,
    mapper: Box<dyn RowMapper<P>>,
}

impl<P> Subtype<P> {
    fn new<S, F>(resolver: SingleTypeResolver<S>, convert: F) -> Self
    where
        S: 'static,
        F: Fn(S) -> P + Send + Sync + 'static,
    {
        Self {
            name: resolver.type_name().to_string(),
            mapper: Box::new(Upcast { resolver, convert }),
        }
    }
}

/// Deferred subtype construction, run with the final configuration
type BuildSubtype<P> = Box<dyn FnOnce(&MapperConfig) -> Result<Subtype<P>>>;

struct PendingSubtype<P> {
    value: String,
    build: BuildSubtype<P>,
}

/// Maps records to `P` by dispatching on a discriminator column
pub struct DiscriminatedResolver<P> {
    column: String,
    case_fold: CaseFold,
    log_resolutions: bool,
    table: FxHashMap<String, Subtype<P>>,
    normalizer: Arc<dyn ColumnNormalizer>,
}

impl<P: 'static> DiscriminatedResolver<P> {
    /// Start building a resolver that dispatches on `column`
    pub fn builder(column: impl Into<String>) -> DiscriminatedResolverBuilder<P> {
        DiscriminatedResolverBuilder::new(column)
    }
}

impl<P> DiscriminatedResolver<P> {
    /// The normalized discriminator column
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Registered discriminator values, sorted
    #[must_use]
    pub fn known_values(&self) -> Vec<String> {
        let mut known: Vec<String> = self.table.keys().cloned().collect();
        known.sort_unstable();
        known
    }

    /// Name of the subtype `record` dispatches to
    pub fn resolve_subtype(&self, record: &Record) -> Result<&str> {
        self.subtype(record).map(|subtype| subtype.name.as_str())
    }

    fn subtype(&self, record: &Record) -> Result<&Subtype<P>> {
        let Some(Value::Text(value)) = record.get(&self.column) else {
            return Err(MapperError::MissingDiscriminator {
                column: self.column.clone(),
                record: record.to_string(),
            });
        };
        let subtype = self
            .table
            .get(&self.case_fold.apply(value))
            .ok_or_else(|| MapperError::UnknownDiscriminator {
                value: value.clone(),
                known: self.known_values(),
                record: record.to_string(),
            })?;

        if self.log_resolutions {
            log_dispatch(&self.column, value, &subtype.name);
        }
        Ok(subtype)
    }
}

impl<P> RowMapper<P> for DiscriminatedResolver<P> {
    fn map_record(&self, record: &Record) -> Result<P> {
        self.subtype(record)?.mapper.map_record(record)
    }

    fn normalizer(&self) -> &dyn ColumnNormalizer {
        self.normalizer.as_ref()
    }
}

impl<P> fmt::Debug for DiscriminatedResolver<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscriminatedResolver")
            .field("column", &self.column)
            .field("known_values", &self.known_values())
            .finish_non_exhaustive()
    }
}

/// Builder class to create a discriminated resolver
///
/// Subtypes are built, and discriminator values folded, only in
/// [`DiscriminatedResolverBuilder::build`], always with the last configuration
/// set.
pub struct DiscriminatedResolverBuilder<P> {
    column: String,
    config: MapperConfig,
    pending: Vec<PendingSubtype<P>>,
    normalizer: Option<Arc<dyn ColumnNormalizer>>,
}

impl<P: 'static> DiscriminatedResolverBuilder<P> {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            config: MapperConfig::default(),
            pending: Vec::new(),
            normalizer: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the column normalizer applied to native column names and to
    /// the discriminator column
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: impl ColumnNormalizer + 'static) -> Self {
        self.normalizer = Some(Arc::new(normalizer));
        self
    }

    /// Register subtype `S` under discriminator `value`
    pub fn add_subtype<S>(self, value: impl AsRef<str>) -> Result<Self>
    where
        S: SchemaSource,
        P: From<S>,
    {
        self.add_subtype_with(value, P::from)
    }

    /// Register subtype `S` under `value`, converting with `convert`
    pub fn add_subtype_with<S, F>(self, value: impl AsRef<str>, convert: F) -> Result<Self>
    where
        S: SchemaSource,
        F: Fn(S) -> P + Send + Sync + 'static,
    {
        self.push(value.as_ref(), move |config| {
            let resolver = SingleTypeResolver::<S>::for_type_with_config(config)?;
            Ok(Subtype::new(resolver, convert))
        })
    }

    /// Register a prebuilt resolver under `value`
    ///
    /// Its schema names must be folded to the same case as the builder's
    /// configuration; [`DiscriminatedResolverBuilder::build`] fails otherwise.
    pub fn add_resolver<S, F>(
        self,
        value: impl AsRef<str>,
        resolver: SingleTypeResolver<S>,
        convert: F,
    ) -> Result<Self>
    where
        S: 'static,
        F: Fn(S) -> P + Send + Sync + 'static,
    {
        let raw = value.as_ref().to_string();
        self.push(value.as_ref(), move |config| {
            let found = resolver.registry().case_fold();
            if found != config.case_fold {
                return Err(MapperError::SubtypeCaseFold {
                    value: raw,
                    type_name: resolver.type_name().to_string(),
                    expected: config.case_fold,
                    found,
                });
            }
            Ok(Subtype::new(resolver, convert))
        })
    }

    fn push(
        mut self,
        value: &str,
        build: impl FnOnce(&MapperConfig) -> Result<Subtype<P>> + 'static,
    ) -> Result<Self> {
        let case_fold = self.config.case_fold;
        let key = case_fold.apply(value);
        if self.pending.iter().any(|pending| case_fold.apply(&pending.value) == key) {
            return Err(MapperError::DuplicateDiscriminator {
                value: value.to_string(),
                column: self.column.clone(),
            });
        }
        self.pending.push(PendingSubtype {
            value: value.to_string(),
            build: Box::new(build),
        });
        Ok(self)
    }

    /// Finalize into a resolver
    pub fn build(self) -> Result<DiscriminatedResolver<P>> {
        let normalizer: Arc<dyn ColumnNormalizer> = match self.normalizer {
            Some(normalizer) => normalizer,
            None => Arc::new(self.config.case_fold),
        };
        if self.column.trim().is_empty() {
            return Err(MapperError::InvalidDiscriminatorColumn);
        }
        let column = normalizer.normalize(&self.column);
        if column.trim().is_empty() {
            return Err(MapperError::InvalidDiscriminatorColumn);
        }
        if self.pending.is_empty() {
            return Err(MapperError::EmptyDiscriminatorTable { column });
        }

        let case_fold = self.config.case_fold;
        let mut table = FxHashMap::with_capacity_and_hasher(self.pending.len(), Default::default());
        for PendingSubtype { value, build } in self.pending {
            let key = case_fold.apply(&value);
            if table.contains_key(&key) {
                return Err(MapperError::DuplicateDiscriminator {
                    value,
                    column: column.clone(),
                });
            }
            table.insert(key, build(&self.config)?);
        }

        log::debug!(
            "Built discriminated resolver on '{}' with {} subtypes",
            column,
            table.len()
        );
        Ok(DiscriminatedResolver {
            column,
            case_fold,
            log_resolutions: self.config.log_resolutions,
            table,
            normalizer,
        })
    }
}
