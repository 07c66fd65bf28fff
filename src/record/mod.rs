//! Records: one input row as a normalized string-keyed map of values.

mod arguments;
#[cfg(feature = "arrow")]
pub mod batch;
mod normalize;
mod value;

use std::fmt;

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use arguments::Arguments;
pub use normalize::ColumnNormalizer;
pub use value::{FromValue, Value, ValueError};

/// One row of input data
///
/// Keys are expected to be normalized already; see [`Record::from_columns`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: FxHashMap<String, Value>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Build a record from native column names, normalizing each one
    pub fn from_columns<K, V, I>(columns: I, normalizer: &dyn ColumnNormalizer) -> Self
    where
        K: AsRef<str>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        columns
            .into_iter()
            .map(|(column, value)| (normalizer.normalize(column.as_ref()), value.into()))
            .collect()
    }

    /// Build a record from a JSON object, normalizing its keys
    pub fn from_json(json: &str, normalizer: &dyn ColumnNormalizer) -> Result<Self> {
        let raw: FxHashMap<String, Value> = serde_json::from_str(json)?;
        Ok(Self::from_columns(raw, normalizer))
    }

    /// Insert a value under an already-normalized key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Builder-style [`Record::insert`]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Keys in sorted order, for diagnostics
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<String> {
        self.values.keys().sorted().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .values
            .iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(k, v)| format!("{k}={v}"))
            .join(", ");
        write!(f, "{{{body}}}")
    }
}
