//! Ordered, deduplicating store of expectation declarations.
//!
//! The config is what [`Dataset::validate`](crate::core::Dataset::validate)
//! replays. Its order is the order of the validation report, so replacing an
//! entry keeps it in its original slot.

use crate::prelude::*;
use crate::value::{Kwargs, COLUMN_KEY};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, instrument};

/// A single declared expectation: its type and the kwargs it was called with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationSpec {
    pub expectation_type: String,
    #[serde(default)]
    pub kwargs: Kwargs,
    /// Entry fields other than the type and kwargs, such as `meta`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExpectationSpec {
    pub fn new(expectation_type: impl Into<String>, kwargs: Kwargs) -> Self {
        Self {
            expectation_type: expectation_type.into(),
            kwargs,
            extra: Map::new(),
        }
    }

    /// Returns the column this expectation applies to, if any.
    pub fn column(&self) -> Option<&str> {
        self.kwargs.get(COLUMN_KEY).and_then(Value::as_str)
    }

    fn is_keyed_by(&self, expectation_type: &str, column: &str) -> bool {
        self.expectation_type == expectation_type && self.column() == Some(column)
    }

    fn to_value(&self) -> Value {
        let mut entry = self.extra.clone();
        entry.insert(
            "expectation_type".to_string(),
            Value::from(self.expectation_type.as_str()),
        );
        entry.insert("kwargs".to_string(), Value::Object(self.kwargs.clone()));
        Value::Object(entry)
    }
}

/// The expectations declared on a dataset, in declaration order.
///
/// At most one entry exists per `(expectation_type, column)` pair. Entries
/// without a `column` are never deduplicated.
///
/// # Examples
///
/// ```rust
/// use tabular_expectations::core::{ExpectationSpec, ExpectationsConfig};
/// use tabular_expectations::value::into_kwargs;
/// use serde_json::json;
///
/// let mut config = ExpectationsConfig::new();
/// let first = into_kwargs(json!({"column": "Age", "min_value": 0})).unwrap();
/// let second = into_kwargs(json!({"column": "Age", "min_value": 1})).unwrap();
///
/// assert!(!config.add_or_replace(ExpectationSpec::new("expect_column_values_to_be_between", first)));
/// assert!(config.add_or_replace(ExpectationSpec::new("expect_column_values_to_be_between", second)));
/// assert_eq!(config.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpectationsConfig {
    #[serde(default)]
    expectations: Vec<ExpectationSpec>,
    /// Top-level fields other than `expectations`, kept for lossless round trips.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ExpectationsConfig {
    /// Creates an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a spec, replacing the existing entry with the same
    /// `(expectation_type, column)` in place. A replaced entry takes the new
    /// kwargs and keeps its other fields.
    ///
    /// Returns true if an existing entry was replaced.
    pub fn add_or_replace(&mut self, spec: ExpectationSpec) -> bool {
        let position = spec
            .column()
            .and_then(|column| self.position(&spec.expectation_type, column));

        match position {
            Some(index) => {
                self.expectations[index].kwargs = spec.kwargs;
                true
            }
            None => {
                self.expectations.push(spec);
                false
            }
        }
    }

    /// Returns the entries in stored order.
    pub fn list(&self) -> &[ExpectationSpec] {
        &self.expectations
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpectationSpec> {
        self.expectations.iter()
    }

    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }

    /// Finds the entry for a column-level expectation.
    pub fn find(&self, expectation_type: &str, column: &str) -> Option<&ExpectationSpec> {
        self.position(expectation_type, column)
            .map(|index| &self.expectations[index])
    }

    /// Removes the entry for a column-level expectation, returning it.
    pub fn remove(&mut self, expectation_type: &str, column: &str) -> Option<ExpectationSpec> {
        self.position(expectation_type, column)
            .map(|index| self.expectations.remove(index))
    }

    fn position(&self, expectation_type: &str, column: &str) -> Option<usize> {
        self.expectations
            .iter()
            .position(|spec| spec.is_keyed_by(expectation_type, column))
    }

    /// Renders the persisted shape `{"expectations": [...]}`.
    pub fn to_serializable(&self) -> Value {
        let mut root = self.extra.clone();
        root.insert(
            "expectations".to_string(),
            Value::Array(self.expectations.iter().map(ExpectationSpec::to_value).collect()),
        );
        Value::Object(root)
    }

    /// Rebuilds a config from its persisted shape, keeping entries as stored.
    pub fn from_serializable(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_serializable())?)
    }

    /// Loads a config from a JSON file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&contents)?;
        debug!(expectations = config.len(), "Loaded expectations config");
        Ok(config)
    }

    /// Writes the config to a JSON file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json_string()?)?;
        debug!(expectations = self.len(), "Saved expectations config");
        Ok(())
    }
}
