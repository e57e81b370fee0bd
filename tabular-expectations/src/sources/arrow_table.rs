//! Table snapshot over Arrow record batches.

use super::Table;
use crate::prelude::*;
use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, SchemaRef,
    UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use serde_json::Value;
use std::borrow::Cow;
use tracing::debug;

/// A read-only snapshot of one or more record batches sharing a schema.
///
/// Cells convert to JSON values on access: integers, floats, booleans and
/// strings map to their JSON counterparts, nulls and NaN to `null`, and any
/// other Arrow type to its display string. Infinite floats become the strings
/// `"inf"` and `"-inf"`.
#[derive(Debug, Clone)]
pub struct ArrowTable {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
    row_count: usize,
}

impl ArrowTable {
    /// Creates a snapshot from batches whose columns match `schema` by name.
    pub fn try_new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Result<Self> {
        let expected: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        for batch in &batches {
            let batch_schema = batch.schema();
            let actual: Vec<&str> = batch_schema
                .fields()
                .iter()
                .map(|f| f.name().as_str())
                .collect();
            if actual != expected {
                return Err(ExpectationError::data_source(
                    "arrow",
                    format!("batch columns {actual:?} do not match schema columns {expected:?}"),
                ));
            }
        }

        let row_count = batches.iter().map(RecordBatch::num_rows).sum();
        debug!(
            batches = batches.len(),
            rows = row_count,
            columns = expected.len(),
            "Created Arrow table snapshot"
        );
        Ok(Self {
            schema,
            batches,
            row_count,
        })
    }

    /// Creates a snapshot of a single batch.
    pub fn from_batch(batch: RecordBatch) -> Self {
        let row_count = batch.num_rows();
        Self {
            schema: batch.schema(),
            batches: vec![batch],
            row_count,
        }
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }
}

impl Table for ArrowTable {
    fn column_names(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .map(|field| field.name().as_str())
            .collect()
    }

    fn get_column(&self, name: &str) -> Result<Cow<'_, [Value]>> {
        let index = self
            .schema
            .index_of(name)
            .map_err(|_| ExpectationError::column_not_found(name))?;

        let mut values = Vec::with_capacity(self.row_count);
        for batch in &self.batches {
            let array = batch.column(index);
            for row in 0..array.len() {
                values.push(cell_value(array.as_ref(), row)?);
            }
        }
        Ok(Cow::Owned(values))
    }

    fn row_count(&self) -> usize {
        self.row_count
    }
}

fn cell_value(array: &dyn Array, row: usize) -> Result<Value> {
    if array.is_null(row) {
        return Ok(Value::Null);
    }

    let value = match array.data_type() {
        DataType::Boolean => Value::Bool(array.as_boolean().value(row)),
        DataType::Int8 => Value::from(array.as_primitive::<Int8Type>().value(row)),
        DataType::Int16 => Value::from(array.as_primitive::<Int16Type>().value(row)),
        DataType::Int32 => Value::from(array.as_primitive::<Int32Type>().value(row)),
        DataType::Int64 => Value::from(array.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => Value::from(array.as_primitive::<UInt8Type>().value(row)),
        DataType::UInt16 => Value::from(array.as_primitive::<UInt16Type>().value(row)),
        DataType::UInt32 => Value::from(array.as_primitive::<UInt32Type>().value(row)),
        DataType::UInt64 => Value::from(array.as_primitive::<UInt64Type>().value(row)),
        DataType::Float32 => float_value(f64::from(array.as_primitive::<Float32Type>().value(row))),
        DataType::Float64 => float_value(array.as_primitive::<Float64Type>().value(row)),
        DataType::Utf8 => Value::from(array.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => Value::from(array.as_string::<i64>().value(row)),
        DataType::Utf8View => Value::from(array.as_string_view().value(row)),
        _ => Value::String(array_value_to_string(array, row)?),
    };
    Ok(value)
}

/// NaN is missing. Infinities have no JSON number form and keep their
/// display string, so predicates still see them.
fn float_value(value: f64) -> Value {
    if value.is_nan() {
        Value::Null
    } else if value.is_infinite() {
        Value::String(value.to_string())
    } else {
        Value::from(value)
    }
}
