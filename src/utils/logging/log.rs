//! Logging utilities
//!
//! This module provides standardized logging functions for resolver operations.

use itertools::Itertools;

use crate::record::Record;
use crate::schema::ConstructionSchema;

/// Log a factory that declares no names and so takes part in no schema
pub fn log_skipped_factory(type_name: &str, factory: &str) {
    log::debug!("Skipping unnamed factory '{factory}' of {type_name}");
}

/// Log a finished registry with its schemas in resolution order
///
/// Equal-size schemas are reported too, since their relative order decides
/// which one wins when a record satisfies both.
pub fn log_registry_built<T>(type_name: &str, schemas: &[ConstructionSchema<T>]) {
    log::debug!(
        "Built schema registry for {} with {} schemas: [{}]",
        type_name,
        schemas.len(),
        schemas.iter().join("; ")
    );

    for (size, group) in &schemas.iter().chunk_by(|s| s.len()) {
        let tied: Vec<_> = group.collect();
        if tied.len() > 1 {
            log::debug!(
                "{} schemas of {} with {} names resolve in declaration order: [{}]",
                tied.len(),
                type_name,
                size,
                tied.iter().join("; ")
            );
        }
    }
}

/// Log the schema picked for a record
pub fn log_resolution<T>(type_name: &str, schema: &ConstructionSchema<T>, record: &Record) {
    log::trace!(
        "Resolved {} to {} for keys [{}]",
        type_name,
        schema,
        record.sorted_keys().join(", ")
    );
}

/// Log the subtype picked for a discriminator value
pub fn log_dispatch(column: &str, value: &str, subtype: &str) {
    log::trace!("Dispatching {column}='{value}' to {subtype}");
}
