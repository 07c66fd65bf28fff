//! Schema extraction
//!
//! Validates the factory declarations of one type and turns the eligible ones
//! into [`ConstructionSchema`]s. A factory is eligible when every parameter is
//! named and ignored when none is; anything in between is an error. Names are
//! folded to the configured case here, once, so resolution never has to.

use crate::config::CaseFold;
use crate::error::{ExtractionIssue, MapperError, Result};
use crate::schema::construction::{ConstructionSchema, FactoryDecl};
use crate::utils::logging::log_skipped_factory;

/// Turns factory declarations into validated schemas
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaExtractor {
    case_fold: CaseFold,
}

impl SchemaExtractor {
    #[must_use]
    pub const fn new(case_fold: CaseFold) -> Self {
        Self { case_fold }
    }

    /// Extract every eligible schema of `type_name`, in declaration order
    ///
    /// Fails when a declaration is malformed, when no declaration is eligible,
    /// or when two declarations share a name set.
    pub fn extract<T>(
        &self,
        type_name: &str,
        decls: Vec<FactoryDecl<T>>,
    ) -> Result<Vec<ConstructionSchema<T>>> {
        let mut schemas: Vec<ConstructionSchema<T>> = Vec::with_capacity(decls.len());

        for decl in decls {
            let (label, params, factory) = decl.into_parts();
            let Some(names) = self.extract_names(type_name, &label, &params)? else {
                log_skipped_factory(type_name, &label);
                continue;
            };
            let schema = ConstructionSchema::new(label, names, factory);

            if let Some(existing) = schemas.iter().find(|s| s.same_names(&schema)) {
                return Err(MapperError::DuplicateSchema {
                    type_name: type_name.to_string(),
                    first: existing.to_string(),
                    second: schema.to_string(),
                });
            }
            schemas.push(schema);
        }

        if schemas.is_empty() {
            return Err(MapperError::NoEligibleSchema {
                type_name: type_name.to_string(),
            });
        }
        Ok(schemas)
    }

    /// Folded names of one declaration, or `None` if it is not eligible
    fn extract_names(
        &self,
        type_name: &str,
        label: &str,
        params: &[Option<String>],
    ) -> Result<Option<Vec<String>>> {
        let fail = |issue| MapperError::SchemaExtraction {
            type_name: type_name.to_string(),
            factory: label.to_string(),
            issue,
        };

        let mut names: Vec<String> = Vec::with_capacity(params.len());
        for (position, declared) in params.iter().enumerate() {
            let Some(declared) = declared else { continue };
            if declared.trim().is_empty() {
                return Err(fail(ExtractionIssue::BlankName { position }));
            }
            let folded = self.case_fold.apply(declared);
            if names.contains(&folded) {
                return Err(fail(ExtractionIssue::DuplicateName {
                    name: declared.clone(),
                }));
            }
            names.push(folded);
        }

        match names.len() {
            0 => Ok(None),
            n if n == params.len() => Ok(Some(names)),
            named => Err(fail(ExtractionIssue::InconsistentNaming {
                named,
                total: params.len(),
            })),
        }
    }
}
