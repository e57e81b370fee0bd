//! Adapter turning per-value predicates into column expectations.
//!
//! A [`ColumnMapExpectation`] applies a predicate to every non-missing value of
//! the column named by the `column` kwarg, in row order, and records the values
//! it rejects together with their row positions. Missing values are skipped
//! but still count towards `element_count`, so they never lower the passing
//! fraction. Success means the passing fraction is at least `mostly`.

use crate::core::{ColumnMapStats, Expectation, ExpectationOptions, RawCheckResult};
use crate::prelude::*;
use crate::sources::Table;
use crate::value::{column_param, is_missing, Kwargs};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{instrument, trace};

/// Verdict of a predicate on a single value. `Err` means the predicate raised.
pub type PredicateOutcome = std::result::Result<bool, String>;

/// A predicate prepared for one evaluation.
pub type ValuePredicate = Box<dyn Fn(&Value) -> PredicateOutcome>;

type PredicateFactory = dyn Fn(&Kwargs) -> Result<ValuePredicate> + Send + Sync;

/// A column expectation built from a per-value predicate.
///
/// # Examples
///
/// ```rust
/// use tabular_expectations::expectations::ColumnMapExpectation;
///
/// let non_negative = ColumnMapExpectation::from_fn("expect_column_values_to_be_non_negative", |value| {
///     value
///         .as_f64()
///         .map(|n| n >= 0.0)
///         .ok_or_else(|| format!("{value} is not numeric"))
/// });
/// ```
#[derive(Clone)]
pub struct ColumnMapExpectation {
    expectation_type: String,
    description: Option<String>,
    factory: Arc<PredicateFactory>,
}

impl ColumnMapExpectation {
    /// Wraps a predicate that needs no parameters besides `column`.
    pub fn from_fn<F>(expectation_type: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> PredicateOutcome + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        Self::with_params(expectation_type, move |_| {
            let predicate = Arc::clone(&predicate);
            Ok(Box::new(move |value: &Value| (*predicate)(value)) as ValuePredicate)
        })
    }

    /// Wraps a predicate factory that reads its parameters from kwargs.
    ///
    /// The factory runs once per evaluation, before any value is visited, and
    /// reports bad parameters as
    /// [`ExpectationError::InvalidConfigurationParameter`].
    pub fn with_params<F>(expectation_type: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Kwargs) -> Result<ValuePredicate> + Send + Sync + 'static,
    {
        Self {
            expectation_type: expectation_type.into(),
            description: None,
            factory: Arc::new(factory),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn apply(&self, values: &[Value], predicate: &ValuePredicate) -> Result<ColumnMapStats> {
        let mut stats = ColumnMapStats {
            element_count: values.len(),
            ..Default::default()
        };

        for (index, value) in values.iter().enumerate() {
            if is_missing(value) {
                stats.missing_count += 1;
                continue;
            }
            match predicate(value) {
                Ok(true) => {}
                Ok(false) => {
                    stats.exception_list.push(value.clone());
                    stats.exception_index_list.push(index);
                }
                Err(message) => {
                    return Err(ExpectationError::evaluation_failure(
                        &self.expectation_type,
                        format!("value {value} at index {index}: {message}"),
                    ))
                }
            }
        }

        Ok(stats)
    }
}

impl fmt::Debug for ColumnMapExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnMapExpectation")
            .field("expectation_type", &self.expectation_type)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl Expectation for ColumnMapExpectation {
    fn expectation_type(&self) -> &str {
        &self.expectation_type
    }

    #[instrument(skip_all, fields(expectation = %self.expectation_type, mostly = options.mostly))]
    fn evaluate(
        &self,
        table: &dyn Table,
        kwargs: &Kwargs,
        options: &ExpectationOptions,
    ) -> Result<RawCheckResult> {
        let column = column_param(kwargs)?;
        let predicate = (*self.factory)(kwargs)?;
        let values = table.get_column(column)?;
        let stats = self.apply(&values, &predicate)?;

        trace!(
            column = %column,
            elements = stats.element_count,
            missing = stats.missing_count,
            unexpected = stats.unexpected_count(),
            "Applied column predicate"
        );
        Ok(RawCheckResult::from_column_map(stats, options.mostly))
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
