//! Expectation and validation result types.

use crate::prelude::*;
use crate::value::Kwargs;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output-format dependent fields of a result. Absent fields are not serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unexpected_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unexpected_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_exception_list: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_exception_index_list: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_list: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_index_list: Option<Vec<usize>>,
}

/// The result of a single expectation call, projected to its output format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationResult {
    pub success: bool,
    #[serde(flatten)]
    pub details: ResultDetails,
    /// Set when `catch_exceptions` contained an evaluation failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_traceback: Option<String>,
}

impl ExpectationResult {
    pub fn new(success: bool, details: ResultDetails) -> Self {
        Self {
            success,
            details,
            exception_traceback: None,
        }
    }

    /// Builds the maximally negative result for a contained failure.
    pub fn raised(error: &ExpectationError) -> Self {
        Self {
            success: false,
            details: ResultDetails::default(),
            exception_traceback: Some(error.to_string()),
        }
    }

    pub fn raised_exception(&self) -> bool {
        self.exception_traceback.is_some()
    }
}

/// One entry of a validation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub expectation_type: String,
    pub kwargs: Kwargs,
    pub success: bool,
    #[serde(flatten)]
    pub details: ResultDetails,
    pub raised_exception: bool,
    #[serde(default)]
    pub exception_traceback: Option<String>,
}

impl ValidationResult {
    /// Wraps a check outcome with the expectation type and kwargs that produced it.
    pub fn from_outcome(
        expectation_type: impl Into<String>,
        kwargs: Kwargs,
        outcome: ExpectationResult,
    ) -> Self {
        Self {
            expectation_type: expectation_type.into(),
            kwargs,
            success: outcome.success,
            raised_exception: outcome.raised_exception(),
            exception_traceback: outcome.exception_traceback,
            details: outcome.details,
        }
    }

    /// Synthesizes the entry for an evaluation failure contained by `catch_exceptions`.
    pub fn raised(
        expectation_type: impl Into<String>,
        kwargs: Kwargs,
        error: &ExpectationError,
    ) -> Self {
        Self::from_outcome(expectation_type, kwargs, ExpectationResult::raised(error))
    }
}

/// The outcome of [`Dataset::validate`](crate::core::Dataset::validate).
///
/// A full run serializes as a bare JSON array of results, while a
/// failures-only run serializes as `{"results": [...]}`. The two shapes are
/// kept distinct for compatibility with persisted reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationReport {
    /// Every configured expectation, in config order
    Full(Vec<ValidationResult>),
    /// Only failed expectations, in config order
    FailuresOnly { results: Vec<ValidationResult> },
}

impl ValidationReport {
    pub fn results(&self) -> &[ValidationResult] {
        match self {
            ValidationReport::Full(results) => results,
            ValidationReport::FailuresOnly { results } => results,
        }
    }

    pub fn into_results(self) -> Vec<ValidationResult> {
        match self {
            ValidationReport::Full(results) => results,
            ValidationReport::FailuresOnly { results } => results,
        }
    }

    /// Returns true if every reported expectation succeeded.
    pub fn success(&self) -> bool {
        self.results().iter().all(|result| result.success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results().iter().filter(|result| !result.success)
    }

    pub fn len(&self) -> usize {
        self.results().len()
    }

    pub fn is_empty(&self) -> bool {
        self.results().is_empty()
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::into_kwargs;
    use serde_json::json;

    fn failed_in_set() -> ValidationResult {
        ValidationResult::from_outcome(
            "expect_column_values_to_be_in_set",
            into_kwargs(json!({"column": "PClass", "values_set": ["1st", "2nd", "3rd"]})).unwrap(),
            ExpectationResult::new(
                false,
                ResultDetails {
                    exception_list: Some(vec![json!("*")]),
                    exception_index_list: Some(vec![456]),
                    ..Default::default()
                },
            ),
        )
    }

    #[test]
    fn test_boolean_only_shape() {
        let result = ExpectationResult::new(true, ResultDetails::default());
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"success": true}));
    }

    #[test]
    fn test_validation_result_shape() {
        let value = serde_json::to_value(failed_in_set()).unwrap();
        assert_eq!(
            value,
            json!({
                "expectation_type": "expect_column_values_to_be_in_set",
                "kwargs": {"column": "PClass", "values_set": ["1st", "2nd", "3rd"]},
                "success": false,
                "exception_list": ["*"],
                "exception_index_list": [456],
                "raised_exception": false,
                "exception_traceback": null
            })
        );
    }

    #[test]
    fn test_raised_result() {
        let err = ExpectationError::evaluation_failure("expect_x", "boom");
        let result = ValidationResult::raised("expect_x", Kwargs::new(), &err);
        assert!(!result.success);
        assert!(result.raised_exception);
        assert_eq!(
            result.exception_traceback.as_deref(),
            Some("Evaluation of 'expect_x' failed: boom")
        );
    }

    #[test]
    fn test_report_shapes() {
        let full = ValidationReport::Full(vec![failed_in_set()]);
        assert!(serde_json::to_value(&full).unwrap().is_array());

        let failures = ValidationReport::FailuresOnly {
            results: vec![failed_in_set()],
        };
        let value = serde_json::to_value(&failures).unwrap();
        assert!(value["results"].is_array());

        let parsed: ValidationReport = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, failures);
        assert!(!parsed.success());
        assert_eq!(parsed.failures().count(), 1);
    }
}
