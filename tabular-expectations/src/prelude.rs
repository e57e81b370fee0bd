//! Prelude for commonly used types and traits.

pub use crate::core::{
    Dataset, Expectation, ExpectationRegistry, ExpectationResult, ExpectationsConfig,
    OutputFormat, ValidateOptions, ValidationReport, ValidationResult,
};
pub use crate::error::{ExpectationError, Result};
pub use crate::logging::LogConfig;
pub use crate::sources::{MemoryTable, Table};
