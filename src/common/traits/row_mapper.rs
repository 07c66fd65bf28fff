//! Row mapping surface shared by all resolvers

use rayon::prelude::*;

#[cfg(feature = "arrow")]
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::record::{ColumnNormalizer, Record, Value};

/// Maps records to instances of `T`
///
/// Implementations hold only read-only state, so one mapper can serve any
/// number of threads at once.
pub trait RowMapper<T>: Send + Sync {
    /// Map a single record whose keys are already normalized
    fn map_record(&self, record: &Record) -> Result<T>;

    /// Normalizer applied to native column names by [`RowMapper::map_columns`]
    fn normalizer(&self) -> &dyn ColumnNormalizer;

    /// Normalize native column names, then map the resulting record
    fn map_columns<K, V, I>(&self, columns: I) -> Result<T>
    where
        Self: Sized,
        K: AsRef<str>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let record = Record::from_columns(columns, self.normalizer());
        self.map_record(&record)
    }

    /// Map records in order, stopping at the first error
    fn map_records(&self, records: &[Record]) -> Result<Vec<T>> {
        records.iter().map(|record| self.map_record(record)).collect()
    }

    /// Map records across the rayon thread pool, preserving order
    fn par_map_records(&self, records: &[Record]) -> Result<Vec<T>>
    where
        T: Send,
    {
        records
            .par_iter()
            .map(|record| self.map_record(record))
            .collect()
    }

    /// Map every row of an Arrow batch, normalizing its column names once
    #[cfg(feature = "arrow")]
    fn map_batch(&self, batch: &RecordBatch) -> Result<Vec<T>> {
        let records = crate::record::batch::records_from_batch(batch, self.normalizer())?;
        self.map_records(&records)
    }
}
