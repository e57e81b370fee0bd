//! # Tabular Expectations
//!
//! A configuration-driven expectation engine for tabular data. Declare
//! per-column correctness rules ("expectations") against a table, get a
//! result immediately, and replay every declared rule later as a validation
//! report.
//!
//! ## Quick Start
//!
//! ```rust
//! use tabular_expectations::prelude::*;
//! use serde_json::json;
//!
//! # fn main() -> Result<()> {
//! let table = MemoryTable::new()
//!     .with_column("PClass", vec![json!("1st"), json!("2nd"), json!("*")])?
//!     .with_column("Age", vec![json!(29), json!(2), json!(null)])?;
//!
//! let mut dataset = Dataset::new();
//! dataset.expect_column_to_exist(&table, "Age")?;
//! dataset.expect(
//!     &table,
//!     "expect_column_values_to_be_in_set",
//!     json!({"column": "PClass", "values_set": ["1st", "2nd", "3rd"], "output_format": "COMPLETE"}),
//! )?;
//!
//! // Persist the declarations, then replay them.
//! let config = dataset.expectations_config().to_json_string()?;
//! let replayed = Dataset::from_config(ExpectationsConfig::from_json_str(&config)?);
//!
//! let report = replayed.validate(&table, ValidateOptions::new().only_return_failures(true))?;
//! assert_eq!(report.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Expectations
//!
//! Per-value predicates become full expectations with
//! [`ColumnMapExpectation`](expectations::ColumnMapExpectation). Once
//! registered they behave exactly like the built-ins, including during
//! validation:
//!
//! ```rust
//! use tabular_expectations::expectations::ColumnMapExpectation;
//! use tabular_expectations::prelude::*;
//! use serde_json::json;
//!
//! # fn main() -> Result<()> {
//! let mut dataset = Dataset::new();
//! dataset.register_expectation(ColumnMapExpectation::from_fn(
//!     "expect_column_values_to_be_odd",
//!     |value| value.as_i64().map(|n| n % 2 != 0).ok_or_else(|| format!("{value} is not an integer")),
//! ));
//!
//! let table = MemoryTable::new().with_column("n", vec![json!(1), json!(2), json!(3)])?;
//! let result = dataset.expect(&table, "expect_column_values_to_be_odd", json!({"column": "n", "mostly": 0.6}))?;
//! assert!(result.success);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`core`**: `Dataset`, the expectations config, the registry and result types
//! - **`expectations`**: the column-map adapter and the built-in catalog
//! - **`sources`**: the `Table` trait plus in-memory and Arrow/DataFusion snapshots
//! - **`value`**: kwargs and cell value helpers
//! - **`logging`**: `tracing` configuration

pub mod core;
pub mod error;
pub mod expectations;
pub mod logging;
pub mod prelude;
pub mod sources;
pub mod value;
