//! Core types of the expectation engine.
//!
//! ## Overview
//!
//! - **[`Dataset`]**: declares expectations against a table and records them
//! - **[`ExpectationsConfig`]**: the ordered, deduplicated record of declarations
//! - **[`Expectation`]**: a named check; built-in and user-defined checks alike
//! - **[`ExpectationRegistry`]**: resolves checks by name
//! - **[`Dataset::validate`]**: replays the config into a [`ValidationReport`]
//!
//! ## Flow
//!
//! ```text
//! Dataset::expect ──► ExpectationRegistry ──► Expectation::evaluate ──► ExpectationResult
//!        │
//!        └─► ExpectationsConfig::add_or_replace
//!
//! Dataset::validate ──► for each ExpectationSpec (config order)
//!                         └─► registry ──► evaluate ──► ValidationResult
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tabular_expectations::core::{Dataset, OutputFormat, ValidateOptions};
//! use tabular_expectations::sources::MemoryTable;
//! use serde_json::json;
//!
//! # fn main() -> tabular_expectations::prelude::Result<()> {
//! let table = MemoryTable::new()
//!     .with_column("Age", vec![json!(22), json!(38), json!(null), json!(-1)])?;
//!
//! let mut dataset = Dataset::new();
//! dataset.set_default_expectation_argument("output_format", "COMPLETE");
//!
//! let result = dataset.expect_column_values_to_be_between(&table, "Age", Some(0.0), Some(120.0))?;
//! assert_eq!(result.details.exception_index_list, Some(vec![3]));
//!
//! let report = dataset.validate(&table, ValidateOptions::new().result_format(OutputFormat::Basic))?;
//! assert!(!report.success());
//! # Ok(())
//! # }
//! ```

mod config;
mod dataset;
mod expectation;
mod options;
mod registry;
mod result;
mod validation;

pub use config::{ExpectationSpec, ExpectationsConfig};
pub use dataset::{Dataset, DatasetBuilder};
pub use expectation::{ColumnMapStats, Expectation, RawCheckResult, SharedExpectation};
pub use options::{
    merge_kwargs, strip_transient, ExpectationOptions, OutputFormat, CATCH_EXCEPTIONS_KEY,
    INCLUDE_CONFIG_KEY, MOSTLY_KEY, OUTPUT_FORMAT_KEY, PARTIAL_EXCEPTION_LIST_LIMIT,
    TRANSIENT_KEYS,
};
pub use registry::ExpectationRegistry;
pub use result::{ExpectationResult, ResultDetails, ValidationReport, ValidationResult};
pub use validation::ValidateOptions;
