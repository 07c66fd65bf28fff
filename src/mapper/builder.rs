//! Object construction from a resolved schema

use crate::error::{MapperError, Result};
use crate::record::{Arguments, Record, Value};
use crate::schema::ConstructionSchema;

/// Invokes a schema's factory with arguments drawn from a record
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectBuilder;

impl ObjectBuilder {
    /// Values of `record` in schema order; absent keys become [`Value::Null`]
    #[must_use]
    pub fn arguments<T>(schema: &ConstructionSchema<T>, record: &Record) -> Arguments {
        Arguments::new(
            schema
                .names()
                .iter()
                .map(|name| record.get(name).cloned().unwrap_or(Value::Null)),
        )
    }

    /// Build a `T` from `record` through `schema`
    ///
    /// A factory failure is reported as a construction error carrying the
    /// schema and the record.
    pub fn build<T>(schema: &ConstructionSchema<T>, record: &Record) -> Result<T> {
        let args = Self::arguments(schema, record);
        schema
            .factory()
            .construct(args)
            .map_err(|source| MapperError::ConstructionInvocation {
                schema: schema.to_string(),
                record: record.to_string(),
                source,
            })
    }
}
