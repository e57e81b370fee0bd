//! Expectation trait and raw check results.

use super::options::{ExpectationOptions, OutputFormat, PARTIAL_EXCEPTION_LIST_LIMIT};
use super::result::{ExpectationResult, ResultDetails};
use crate::prelude::*;
use crate::sources::Table;
use crate::value::Kwargs;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;

/// Per-value statistics accumulated by a column-map check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMapStats {
    /// Number of values in the column, missing values included
    pub element_count: usize,
    /// Number of missing values (never passed to the predicate)
    pub missing_count: usize,
    /// Values the predicate rejected, in index order
    pub exception_list: Vec<Value>,
    /// Positions of the rejected values, ascending
    pub exception_index_list: Vec<usize>,
}

impl ColumnMapStats {
    pub fn unexpected_count(&self) -> usize {
        self.exception_list.len()
    }

    /// Fraction of elements the predicate rejected; 0 for an empty column.
    pub fn unexpected_percent(&self) -> f64 {
        if self.element_count == 0 {
            0.0
        } else {
            self.unexpected_count() as f64 / self.element_count as f64
        }
    }

    /// Returns true if the passing fraction is at least `mostly`.
    ///
    /// An empty column is vacuously successful.
    pub fn meets(&self, mostly: f64) -> bool {
        if self.element_count == 0 {
            return true;
        }
        let passing = self.element_count - self.unexpected_count();
        passing as f64 / self.element_count as f64 >= mostly
    }
}

/// The unprojected outcome of evaluating an expectation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCheckResult {
    pub success: bool,
    /// Present for column-map checks
    pub column_map: Option<ColumnMapStats>,
    /// Present for dataset-level checks that measure something
    pub observed_value: Option<Value>,
}

impl RawCheckResult {
    /// A dataset-level outcome with nothing but a verdict.
    pub fn new(success: bool) -> Self {
        Self {
            success,
            column_map: None,
            observed_value: None,
        }
    }

    pub fn with_observed_value(mut self, value: impl Into<Value>) -> Self {
        self.observed_value = Some(value.into());
        self
    }

    /// A column-map outcome, judged against `mostly`.
    pub fn from_column_map(stats: ColumnMapStats, mostly: f64) -> Self {
        Self {
            success: stats.meets(mostly),
            column_map: Some(stats),
            observed_value: None,
        }
    }

    /// Projects this outcome onto the fields `format` exposes.
    pub fn project(&self, format: OutputFormat) -> ExpectationResult {
        if format == OutputFormat::BooleanOnly {
            return ExpectationResult::new(self.success, ResultDetails::default());
        }

        let mut details = ResultDetails {
            observed_value: self.observed_value.clone(),
            ..Default::default()
        };

        if let Some(stats) = &self.column_map {
            details.element_count = Some(stats.element_count);
            details.missing_count = Some(stats.missing_count);
            details.unexpected_count = Some(stats.unexpected_count());
            details.unexpected_percent = Some(stats.unexpected_percent());

            match format {
                OutputFormat::Summary => {
                    let limit = PARTIAL_EXCEPTION_LIST_LIMIT.min(stats.exception_list.len());
                    details.partial_exception_list = Some(stats.exception_list[..limit].to_vec());
                    details.partial_exception_index_list =
                        Some(stats.exception_index_list[..limit].to_vec());
                }
                OutputFormat::Complete => {
                    details.exception_list = Some(stats.exception_list.clone());
                    details.exception_index_list = Some(stats.exception_index_list.clone());
                }
                OutputFormat::Basic | OutputFormat::BooleanOnly => {}
            }
        }

        ExpectationResult::new(self.success, details)
    }
}

/// A named check that can be evaluated against a table.
///
/// Built-in and user-defined checks implement this trait alike and are looked
/// up by [`expectation_type`](Expectation::expectation_type) through the
/// [`ExpectationRegistry`](crate::core::ExpectationRegistry).
///
/// # Examples
///
/// ```rust
/// use tabular_expectations::core::{Expectation, ExpectationOptions, RawCheckResult};
/// use tabular_expectations::prelude::*;
/// use tabular_expectations::sources::Table;
/// use tabular_expectations::value::Kwargs;
///
/// #[derive(Debug)]
/// struct HasRows;
///
/// impl Expectation for HasRows {
///     fn expectation_type(&self) -> &str {
///         "expect_table_to_have_rows"
///     }
///
///     fn evaluate(
///         &self,
///         table: &dyn Table,
///         _kwargs: &Kwargs,
///         _options: &ExpectationOptions,
///     ) -> Result<RawCheckResult> {
///         Ok(RawCheckResult::new(table.row_count() > 0))
///     }
/// }
/// ```
pub trait Expectation: Debug + Send + Sync {
    /// The name this check is registered and persisted under.
    fn expectation_type(&self) -> &str;

    /// Evaluates the check against the table's current data.
    ///
    /// `kwargs` are the effective kwargs (dataset defaults overlaid with the
    /// call or stored kwargs); `options` are already parsed from them.
    fn evaluate(
        &self,
        table: &dyn Table,
        kwargs: &Kwargs,
        options: &ExpectationOptions,
    ) -> Result<RawCheckResult>;

    /// Returns a description of what this check validates.
    fn description(&self) -> Option<&str> {
        None
    }
}

/// A shared expectation, as stored in a registry.
pub type SharedExpectation = Arc<dyn Expectation>;
