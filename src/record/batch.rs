//! Arrow row source
//!
//! Turns the rows of a [`RecordBatch`] into [`Record`]s, normalizing column
//! names once per batch.

use arrow::array::{
    Array, ArrayRef, BinaryArray, BooleanArray, Date32Array, Date64Array, Float32Array,
    Float64Array, Int8Array, Int16Array, Int32Array, Int64Array, LargeStringArray, StringArray,
    TimestampMicrosecondArray, TimestampMillisecondArray, TimestampNanosecondArray,
    TimestampSecondArray, UInt8Array, UInt16Array, UInt32Array,
};
use arrow::datatypes::{DataType, TimeUnit};
use arrow::record_batch::RecordBatch;

use super::{ColumnNormalizer, Record, Value};
use crate::error::{MapperError, Result};

fn downcast<'a, A: Array + 'static>(column: &str, array: &'a ArrayRef) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| MapperError::UnsupportedColumn {
            column: column.to_string(),
            data_type: array.data_type().to_string(),
        })
}

macro_rules! cell {
    ($column:expr, $array:expr, $ty:ty, $row:expr, |$v:ident| $conv:expr) => {{
        let $v = downcast::<$ty>($column, $array)?.value($row);
        $conv
    }};
}

macro_rules! temporal_cell {
    ($column:expr, $array:expr, $ty:ty, $row:expr, $method:ident, $variant:ident) => {
        downcast::<$ty>($column, $array)?
            .$method($row)
            .map_or(Value::Null, Value::$variant)
    };
}

/// Read one cell of `array` as a [`Value`]
fn cell_value(column: &str, array: &ArrayRef, row: usize) -> Result<Value> {
    if array.is_null(row) {
        return Ok(Value::Null);
    }
    let value = match array.data_type() {
        DataType::Null => Value::Null,
        DataType::Boolean => cell!(column, array, BooleanArray, row, |v| Value::Bool(v)),
        DataType::Int8 => cell!(column, array, Int8Array, row, |v| Value::Int(i64::from(v))),
        DataType::Int16 => cell!(column, array, Int16Array, row, |v| Value::Int(i64::from(v))),
        DataType::Int32 => cell!(column, array, Int32Array, row, |v| Value::Int(i64::from(v))),
        DataType::Int64 => cell!(column, array, Int64Array, row, |v| Value::Int(v)),
        DataType::UInt8 => cell!(column, array, UInt8Array, row, |v| Value::Int(i64::from(v))),
        DataType::UInt16 => cell!(column, array, UInt16Array, row, |v| Value::Int(i64::from(v))),
        DataType::UInt32 => cell!(column, array, UInt32Array, row, |v| Value::Int(i64::from(v))),
        DataType::Float32 => cell!(column, array, Float32Array, row, |v| Value::Float(f64::from(v))),
        DataType::Float64 => cell!(column, array, Float64Array, row, |v| Value::Float(v)),
        DataType::Utf8 => cell!(column, array, StringArray, row, |v| Value::Text(v.to_string())),
        DataType::LargeUtf8 => {
            cell!(column, array, LargeStringArray, row, |v| Value::Text(v.to_string()))
        }
        DataType::Binary => cell!(column, array, BinaryArray, row, |v| Value::Bytes(v.to_vec())),
        DataType::Date32 => temporal_cell!(column, array, Date32Array, row, value_as_date, Date),
        DataType::Date64 => temporal_cell!(column, array, Date64Array, row, value_as_date, Date),
        DataType::Timestamp(TimeUnit::Second, None) => {
            temporal_cell!(column, array, TimestampSecondArray, row, value_as_datetime, Timestamp)
        }
        DataType::Timestamp(TimeUnit::Millisecond, None) => {
            temporal_cell!(column, array, TimestampMillisecondArray, row, value_as_datetime, Timestamp)
        }
        DataType::Timestamp(TimeUnit::Microsecond, None) => {
            temporal_cell!(column, array, TimestampMicrosecondArray, row, value_as_datetime, Timestamp)
        }
        DataType::Timestamp(TimeUnit::Nanosecond, None) => {
            temporal_cell!(column, array, TimestampNanosecondArray, row, value_as_datetime, Timestamp)
        }
        other => {
            return Err(MapperError::UnsupportedColumn {
                column: column.to_string(),
                data_type: other.to_string(),
            });
        }
    };
    Ok(value)
}

/// Convert a single row of `batch` into a [`Record`]
///
/// Fails with [`MapperError::RowOutOfBounds`] when `row` is past the last row.
pub fn record_from_row(
    batch: &RecordBatch,
    row: usize,
    normalizer: &dyn ColumnNormalizer,
) -> Result<Record> {
    if row >= batch.num_rows() {
        return Err(MapperError::RowOutOfBounds {
            row,
            rows: batch.num_rows(),
        });
    }
    let schema = batch.schema();
    let mut record = Record::with_capacity(batch.num_columns());
    for (field, array) in schema.fields().iter().zip(batch.columns()) {
        let value = cell_value(field.name(), array, row)?;
        record.insert(normalizer.normalize(field.name()), value);
    }
    Ok(record)
}

/// Convert every row of `batch` into a [`Record`]
pub fn records_from_batch(
    batch: &RecordBatch,
    normalizer: &dyn ColumnNormalizer,
) -> Result<Vec<Record>> {
    let schema = batch.schema();
    let keys: Vec<String> = schema
        .fields()
        .iter()
        .map(|field| normalizer.normalize(field.name()))
        .collect();

    (0..batch.num_rows())
        .map(|row| {
            let mut record = Record::with_capacity(keys.len());
            for ((key, field), array) in keys.iter().zip(schema.fields().iter()).zip(batch.columns())
            {
                record.insert(key.clone(), cell_value(field.name(), array, row)?);
            }
            Ok(record)
        })
        .collect()
}
