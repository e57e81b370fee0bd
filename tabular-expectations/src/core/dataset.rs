//! The dataset: an expectations config, a registry and default arguments.

use super::config::{ExpectationSpec, ExpectationsConfig};
use super::expectation::Expectation;
use super::options::{merge_kwargs, strip_transient, ExpectationOptions};
use super::registry::ExpectationRegistry;
use super::result::ExpectationResult;
use crate::expectations::{COLUMN_TO_EXIST, VALUES_TO_BE_BETWEEN, VALUES_TO_BE_IN_SET};
use crate::logging::{truncate_field, LogConfig};
use crate::prelude::*;
use crate::sources::Table;
use crate::value::{into_kwargs, Kwargs, COLUMN_KEY};
use serde_json::Value;
use tracing::{debug, error, instrument};

/// Declares expectations against tables and records them for later validation.
///
/// A `Dataset` does not own any data. Every call borrows a [`Table`] for its
/// duration, so validating after the data changed means passing the changed
/// table.
///
/// # Examples
///
/// ```rust
/// use tabular_expectations::core::Dataset;
/// use tabular_expectations::sources::MemoryTable;
/// use serde_json::json;
///
/// # fn main() -> tabular_expectations::prelude::Result<()> {
/// let table = MemoryTable::new().with_column("aaa", vec![json!(1), json!(2), json!(3)])?;
///
/// let mut dataset = Dataset::new();
/// let result = dataset.expect(
///     &table,
///     "expect_column_values_to_be_between",
///     json!({"column": "aaa", "min_value": 1, "max_value": 3}),
/// )?;
///
/// assert!(result.success);
/// assert_eq!(dataset.expectations_config().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    config: ExpectationsConfig,
    registry: ExpectationRegistry,
    defaults: Kwargs,
    log_config: LogConfig,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}

impl Dataset {
    /// Creates a dataset with an empty config and the built-in expectations.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a dataset that starts from a previously persisted config.
    pub fn from_config(config: ExpectationsConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Creates a dataset that already declares `expect_column_to_exist` for
    /// every column of `table`, in column order.
    pub fn for_table(table: &dyn Table) -> Self {
        Self::builder().declare_columns(table).build()
    }

    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    /// Sets a default applied to every subsequent expectation call.
    ///
    /// Call-site kwargs win over defaults. Entries already recorded in the
    /// config are not rewritten.
    pub fn set_default_expectation_argument(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) {
        let key = key.into();
        let value = value.into();
        debug!(key = %key, value = %value, "Set default expectation argument");
        self.defaults.insert(key, value);
    }

    pub fn default_expectation_arguments(&self) -> &Kwargs {
        &self.defaults
    }

    /// Returns a snapshot of the config in its persisted shape.
    ///
    /// The snapshot is detached; mutating it does not affect the dataset.
    pub fn get_expectations_config(&self) -> Value {
        self.config.to_serializable()
    }

    pub fn expectations_config(&self) -> &ExpectationsConfig {
        &self.config
    }

    /// Replaces the config wholesale.
    pub fn set_expectations_config(&mut self, config: ExpectationsConfig) {
        debug!(expectations = config.len(), "Replaced expectations config");
        self.config = config;
    }

    pub fn registry(&self) -> &ExpectationRegistry {
        &self.registry
    }

    /// Makes a user-defined check callable by name on this dataset.
    ///
    /// Returns true if a check with the same name was replaced.
    pub fn register_expectation<E: Expectation + 'static>(&mut self, expectation: E) -> bool {
        self.registry.register(expectation)
    }

    /// Evaluates an expectation against `table` and records it in the config.
    ///
    /// `kwargs` must be a JSON object (or `null` for none). They are overlaid
    /// on the dataset defaults before evaluation. The call is recorded, minus
    /// the transient `output_format`, `include_config` and `catch_exceptions`
    /// keys, unless the effective `include_config` is false. A call that fails
    /// is not recorded.
    ///
    /// With `catch_exceptions`, an evaluation failure becomes a failed result
    /// carrying an `exception_traceback`. Other errors always propagate.
    #[instrument(skip(self, table, kwargs))]
    pub fn expect(
        &mut self,
        table: &dyn Table,
        expectation_type: &str,
        kwargs: impl Into<Value>,
    ) -> Result<ExpectationResult> {
        let call = into_kwargs(kwargs.into())?;
        let effective = merge_kwargs(&self.defaults, &call);
        let options = ExpectationOptions::from_kwargs(&effective)?;

        let result = match self.check(table, expectation_type, &effective, &options) {
            Ok(result) => result,
            Err(e) if options.catch_exceptions && e.is_containable() => {
                error!(
                    expectation = %expectation_type,
                    error = %e,
                    error.type = "expectation_evaluation",
                    "Contained expectation failure"
                );
                ExpectationResult::raised(&e)
            }
            Err(e) => return Err(e),
        };

        if options.include_config {
            let replaced = self
                .config
                .add_or_replace(ExpectationSpec::new(expectation_type, strip_transient(&call)));
            debug!(
                replaced,
                expectations = self.config.len(),
                "Recorded expectation"
            );
        }

        Ok(result)
    }

    /// Evaluates a check with already-merged kwargs, without recording it.
    pub(super) fn check(
        &self,
        table: &dyn Table,
        expectation_type: &str,
        kwargs: &Kwargs,
        options: &ExpectationOptions,
    ) -> Result<ExpectationResult> {
        let expectation = self.registry.get(expectation_type)?;
        let raw = expectation.evaluate(table, kwargs, options)?;

        // Rendered outside the macro: tracing's field macros shadow `Value`.
        let logged_kwargs = truncate_field(
            &Value::Object(kwargs.clone()).to_string(),
            self.log_config.max_field_length,
        );
        crate::log_expectation!(
            self.log_config,
            expectation = %expectation_type,
            kwargs = %logged_kwargs,
            success = raw.success,
            output_format = %options.output_format,
            "Evaluated expectation"
        );

        Ok(raw.project(options.output_format))
    }

    /// Checks that `column` exists.
    pub fn expect_column_to_exist(
        &mut self,
        table: &dyn Table,
        column: &str,
    ) -> Result<ExpectationResult> {
        self.expect(table, COLUMN_TO_EXIST, column_kwargs(column))
    }

    /// Checks that the values of `column` lie within the given bounds.
    pub fn expect_column_values_to_be_between(
        &mut self,
        table: &dyn Table,
        column: &str,
        min_value: Option<f64>,
        max_value: Option<f64>,
    ) -> Result<ExpectationResult> {
        let mut kwargs = column_kwargs(column);
        if let Some(min) = min_value {
            kwargs.insert("min_value".to_string(), Value::from(min));
        }
        if let Some(max) = max_value {
            kwargs.insert("max_value".to_string(), Value::from(max));
        }
        self.expect(table, VALUES_TO_BE_BETWEEN, kwargs)
    }

    /// Checks that the values of `column` are members of `values_set`.
    pub fn expect_column_values_to_be_in_set(
        &mut self,
        table: &dyn Table,
        column: &str,
        values_set: Vec<Value>,
    ) -> Result<ExpectationResult> {
        let mut kwargs = column_kwargs(column);
        kwargs.insert("values_set".to_string(), Value::Array(values_set));
        self.expect(table, VALUES_TO_BE_IN_SET, kwargs)
    }
}

fn column_kwargs(column: &str) -> Kwargs {
    let mut kwargs = Kwargs::new();
    kwargs.insert(COLUMN_KEY.to_string(), Value::from(column));
    kwargs
}

/// Builder for [`Dataset`].
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    registry: Option<ExpectationRegistry>,
    config: ExpectationsConfig,
    defaults: Kwargs,
    log_config: LogConfig,
}

impl DatasetBuilder {
    /// Uses `registry` instead of the built-ins.
    pub fn registry(mut self, registry: ExpectationRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Adds a user-defined check on top of the registry.
    pub fn expectation<E: Expectation + 'static>(mut self, expectation: E) -> Self {
        self.registry
            .get_or_insert_with(ExpectationRegistry::with_builtins)
            .register(expectation);
        self
    }

    pub fn config(mut self, config: ExpectationsConfig) -> Self {
        self.config = config;
        self
    }

    /// Records an existence check for each column of `table`.
    ///
    /// Declarations go into the config being built, so call this after
    /// [`config`](Self::config) to keep both.
    pub fn declare_columns(mut self, table: &dyn Table) -> Self {
        let columns = table.column_names();
        for column in &columns {
            self.config
                .add_or_replace(ExpectationSpec::new(COLUMN_TO_EXIST, column_kwargs(column)));
        }
        debug!(columns = columns.len(), "Declared column existence expectations");
        self
    }

    pub fn default_argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    pub fn log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    pub fn build(self) -> Dataset {
        Dataset {
            config: self.config,
            registry: self
                .registry
                .unwrap_or_else(ExpectationRegistry::with_builtins),
            defaults: self.defaults,
            log_config: self.log_config,
        }
    }
}
