//! Replaying a dataset's config against a table.

use super::dataset::Dataset;
use super::options::{merge_kwargs, ExpectationOptions, OutputFormat, OUTPUT_FORMAT_KEY};
use super::result::{ValidationReport, ValidationResult};
use crate::prelude::*;
use crate::sources::Table;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

/// Options for [`Dataset::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidateOptions {
    /// Turn evaluation failures into failed entries instead of aborting the run
    pub catch_exceptions: bool,
    /// Report only failed entries, wrapped in `{"results": [...]}`
    pub only_return_failures: bool,
    /// Output format for every entry, overriding stored and default formats
    pub result_format: Option<OutputFormat>,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            catch_exceptions: true,
            only_return_failures: false,
            result_format: None,
        }
    }
}

impl ValidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catch_exceptions(mut self, enabled: bool) -> Self {
        self.catch_exceptions = enabled;
        self
    }

    pub fn only_return_failures(mut self, enabled: bool) -> Self {
        self.only_return_failures = enabled;
        self
    }

    pub fn result_format(mut self, format: OutputFormat) -> Self {
        self.result_format = Some(format);
        self
    }
}

impl Dataset {
    /// Re-evaluates every configured expectation against `table`.
    ///
    /// Entries run in config order and the report keeps that order. Each
    /// entry's kwargs are the dataset defaults overlaid with its stored kwargs,
    /// and the report carries those effective kwargs. Any `catch_exceptions`
    /// stored with an entry is ignored; `options.catch_exceptions` decides.
    ///
    /// Configuration and lookup errors abort the run regardless of
    /// `catch_exceptions`, and an aborted run returns no partial report.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tabular_expectations::core::{Dataset, ValidateOptions, ValidationReport};
    /// use tabular_expectations::sources::MemoryTable;
    /// use serde_json::json;
    ///
    /// # fn main() -> tabular_expectations::prelude::Result<()> {
    /// let table = MemoryTable::new().with_column("PClass", vec![json!("1st"), json!("*")])?;
    /// let mut dataset = Dataset::new();
    /// dataset.expect_column_to_exist(&table, "PClass")?;
    /// dataset.expect_column_values_to_be_in_set(&table, "PClass", vec![json!("1st"), json!("2nd")])?;
    ///
    /// let report = dataset.validate(&table, ValidateOptions::new().only_return_failures(true))?;
    /// assert!(matches!(report, ValidationReport::FailuresOnly { .. }));
    /// assert_eq!(report.len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, table), fields(expectations = self.expectations_config().len()))]
    pub fn validate(
        &self,
        table: &dyn Table,
        options: ValidateOptions,
    ) -> Result<ValidationReport> {
        let config = self.expectations_config();
        let mut results = Vec::with_capacity(config.len());

        for spec in config.iter() {
            let mut kwargs = merge_kwargs(self.default_expectation_arguments(), &spec.kwargs);
            if let Some(format) = options.result_format {
                kwargs.insert(OUTPUT_FORMAT_KEY.to_string(), Value::from(format.as_str()));
            }
            let expectation_options = ExpectationOptions::from_kwargs(&kwargs)?;

            debug!(
                expectation = %spec.expectation_type,
                column = ?spec.column(),
                "Running expectation"
            );

            let result = match self.check(
                table,
                &spec.expectation_type,
                &kwargs,
                &expectation_options,
            ) {
                Ok(outcome) => {
                    ValidationResult::from_outcome(&spec.expectation_type, kwargs, outcome)
                }
                Err(e) if options.catch_exceptions && e.is_containable() => {
                    error!(
                        expectation = %spec.expectation_type,
                        column = ?spec.column(),
                        error = %e,
                        error.type = "expectation_evaluation",
                        "Error evaluating expectation"
                    );
                    ValidationResult::raised(&spec.expectation_type, kwargs, &e)
                }
                Err(e) => return Err(e),
            };

            if !result.success && !result.raised_exception {
                warn!(
                    expectation = %result.expectation_type,
                    column = ?spec.column(),
                    unexpected = ?result.details.unexpected_count,
                    "Expectation failed"
                );
            }
            results.push(result);
        }

        let failed = results.iter().filter(|result| !result.success).count();
        info!(
            validation.total = results.len(),
            validation.passed = results.len() - failed,
            validation.failed = failed,
            validation.only_failures = options.only_return_failures,
            "Validation completed"
        );

        if options.only_return_failures {
            results.retain(|result| !result.success);
            Ok(ValidationReport::FailuresOnly { results })
        } else {
            Ok(ValidationReport::Full(results))
        }
    }
}
