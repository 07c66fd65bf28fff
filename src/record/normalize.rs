//! Column name normalization
//!
//! Resolvers never fold record keys themselves; the row source hands them keys
//! that have already been passed through a [`ColumnNormalizer`].

use crate::config::CaseFold;

/// Turns a native column name into a record key
pub trait ColumnNormalizer: Send + Sync {
    fn normalize(&self, column: &str) -> String;
}

impl ColumnNormalizer for CaseFold {
    fn normalize(&self, column: &str) -> String {
        self.apply(column)
    }
}

impl<F> ColumnNormalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, column: &str) -> String {
        self(column)
    }
}
