//! Built-in dataset-level expectations.

use crate::core::{Expectation, ExpectationOptions, RawCheckResult};
use crate::prelude::*;
use crate::sources::Table;
use crate::value::{bounds, column_param, Kwargs};
use tracing::debug;

pub const COLUMN_TO_EXIST: &str = "expect_column_to_exist";
pub const TABLE_ROW_COUNT_TO_BE_BETWEEN: &str = "expect_table_row_count_to_be_between";

/// Checks that the column named by `column` is present.
///
/// A missing column is a failed result here, not a
/// [`ExpectationError::ColumnNotFound`].
#[derive(Debug, Clone, Default)]
pub struct ColumnExistsExpectation;

impl Expectation for ColumnExistsExpectation {
    fn expectation_type(&self) -> &str {
        COLUMN_TO_EXIST
    }

    fn evaluate(
        &self,
        table: &dyn Table,
        kwargs: &Kwargs,
        _options: &ExpectationOptions,
    ) -> Result<RawCheckResult> {
        let column = column_param(kwargs)?;
        let exists = table.has_column(column);
        debug!(column = %column, exists, "Checked column existence");
        Ok(RawCheckResult::new(exists))
    }

    fn description(&self) -> Option<&str> {
        Some("Checks that a column exists in the table")
    }
}

/// Checks that the row count lies within `[min_value, max_value]`.
#[derive(Debug, Clone, Default)]
pub struct RowCountExpectation;

impl Expectation for RowCountExpectation {
    fn expectation_type(&self) -> &str {
        TABLE_ROW_COUNT_TO_BE_BETWEEN
    }

    fn evaluate(
        &self,
        table: &dyn Table,
        kwargs: &Kwargs,
        _options: &ExpectationOptions,
    ) -> Result<RawCheckResult> {
        let (min, max) = bounds(kwargs)?;
        let rows = table.row_count();
        let n = rows as f64;
        let success = min.map_or(true, |min| n >= min) && max.map_or(true, |max| n <= max);
        Ok(RawCheckResult::new(success).with_observed_value(rows))
    }

    fn description(&self) -> Option<&str> {
        Some("Checks that the number of rows lies between min_value and max_value")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::MemoryTable;
    use crate::value::into_kwargs;
    use serde_json::json;

    fn table() -> MemoryTable {
        MemoryTable::new()
            .with_column("Name", vec![json!("Allen"), json!("Allison"), json!("Anderson")])
            .unwrap()
    }

    #[test]
    fn test_column_exists() {
        let options = ExpectationOptions::default();
        let present = into_kwargs(json!({"column": "Name"})).unwrap();
        let absent = into_kwargs(json!({"column": "Cabin"})).unwrap();

        assert!(ColumnExistsExpectation.evaluate(&table(), &present, &options).unwrap().success);
        assert!(!ColumnExistsExpectation.evaluate(&table(), &absent, &options).unwrap().success);
    }

    #[test]
    fn test_row_count_bounds() {
        let options = ExpectationOptions::default();
        let within = into_kwargs(json!({"min_value": 1, "max_value": 3})).unwrap();
        let raw = RowCountExpectation.evaluate(&table(), &within, &options).unwrap();
        assert!(raw.success);
        assert_eq!(raw.observed_value, Some(json!(3)));

        let above = into_kwargs(json!({"min_value": 4})).unwrap();
        assert!(!RowCountExpectation.evaluate(&table(), &above, &options).unwrap().success);

        assert!(matches!(
            RowCountExpectation.evaluate(&table(), &Kwargs::new(), &options),
            Err(ExpectationError::InvalidConfigurationParameter { .. })
        ));
    }
}
