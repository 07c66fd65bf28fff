//! Schema registry and the resolution algorithm
//!
//! Schemas are kept in descending order of name count; equal-size schemas keep
//! their declaration order. Resolution returns the first schema whose names
//! are all keys of the record, so a row carrying more optional columns picks
//! the richer factory and a sparser row falls back to a smaller one.

use std::fmt;

use crate::config::{AmbiguityPolicy, CaseFold, MapperConfig};
use crate::error::{MapperError, Result};
use crate::record::Record;
use crate::schema::construction::{ConstructionSchema, FactoryDecl};
use crate::schema::extractor::SchemaExtractor;
use crate::utils::logging::{log_registry_built, log_resolution};

/// All construction schemas of one type, ordered for resolution
pub struct SchemaRegistry<T> {
    type_name: String,
    schemas: Vec<ConstructionSchema<T>>,
    case_fold: CaseFold,
    ambiguity: AmbiguityPolicy,
    log_resolutions: bool,
}

impl<T> SchemaRegistry<T> {
    /// Extract and register the schemas declared for `type_name`
    pub fn from_decls(
        type_name: impl Into<String>,
        decls: Vec<FactoryDecl<T>>,
        config: &MapperConfig,
    ) -> Result<Self> {
        let type_name = type_name.into();
        let schemas = SchemaExtractor::new(config.case_fold).extract(&type_name, decls)?;
        Self::new(type_name, schemas, config)
    }

    /// Register already extracted schemas
    pub fn new(
        type_name: impl Into<String>,
        mut schemas: Vec<ConstructionSchema<T>>,
        config: &MapperConfig,
    ) -> Result<Self> {
        let type_name = type_name.into();
        if schemas.is_empty() {
            return Err(MapperError::NoEligibleSchema { type_name });
        }
        for (i, first) in schemas.iter().enumerate() {
            if let Some(second) = schemas[i + 1..].iter().find(|s| s.same_names(first)) {
                return Err(MapperError::DuplicateSchema {
                    type_name,
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }
        }

        // stable: equal sizes keep declaration order
        schemas.sort_by(|a, b| b.len().cmp(&a.len()));

        log_registry_built(&type_name, &schemas);
        Ok(Self {
            type_name,
            schemas,
            case_fold: config.case_fold,
            ambiguity: config.ambiguity,
            log_resolutions: config.log_resolutions,
        })
    }

    /// Select the schema to build `record` with
    pub fn resolve(&self, record: &Record) -> Result<&ConstructionSchema<T>> {
        let Some(index) = self.schemas.iter().position(|s| s.is_satisfied_by(record)) else {
            return Err(MapperError::NoMatchingSchema {
                type_name: self.type_name.clone(),
                keys: record.sorted_keys(),
                candidates: self.candidates(),
            });
        };
        let schema = &self.schemas[index];

        if self.ambiguity == AmbiguityPolicy::Reject {
            let tied: Vec<String> = self.schemas[index..]
                .iter()
                .take_while(|s| s.len() == schema.len())
                .filter(|s| s.is_satisfied_by(record))
                .map(ToString::to_string)
                .collect();
            if tied.len() > 1 {
                return Err(MapperError::AmbiguousSchema {
                    type_name: self.type_name.clone(),
                    keys: record.sorted_keys(),
                    candidates: tied,
                });
            }
        }

        if self.log_resolutions {
            log_resolution(&self.type_name, schema, record);
        }
        Ok(schema)
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Case the schema names were folded to
    #[must_use]
    pub fn case_fold(&self) -> CaseFold {
        self.case_fold
    }

    /// Schemas in resolution order
    #[must_use]
    pub fn schemas(&self) -> &[ConstructionSchema<T>] {
        &self.schemas
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    fn candidates(&self) -> Vec<String> {
        self.schemas.iter().map(ToString::to_string).collect()
    }
}

impl<T> fmt::Debug for SchemaRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("type_name", &self.type_name)
            .field("schemas", &self.schemas)
            .field("case_fold", &self.case_fold)
            .field("ambiguity", &self.ambiguity)
            .finish()
    }
}
