//! Error types for the expectation engine.
//!
//! All fallible operations return [`ExpectationError`]. Only
//! [`ExpectationError::EvaluationFailure`] is ever contained by
//! `catch_exceptions`; every other variant describes a malformed call or
//! configuration and always propagates to the caller.

use thiserror::Error;

/// The main error type for the expectation engine.
#[derive(Error, Debug)]
pub enum ExpectationError {
    /// A referenced column does not exist in the table.
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// A configuration entry references a check that is not registered.
    #[error("Unknown expectation type '{expectation_type}'")]
    UnknownExpectationType { expectation_type: String },

    /// A call-site or stored parameter is missing, ill-typed or out of range.
    #[error("Invalid configuration parameter '{parameter}': {message}")]
    InvalidConfigurationParameter {
        /// Name of the offending parameter
        parameter: String,
        /// Detailed error message
        message: String,
    },

    /// A predicate raised while being applied to a value.
    #[error("Evaluation of '{expectation_type}' failed: {message}")]
    EvaluationFailure {
        /// The expectation being evaluated
        expectation_type: String,
        /// Detailed error message
        message: String,
    },

    /// Error from a table collaborator (in-memory or Arrow snapshot).
    #[error("Data source error: {message}")]
    DataSource {
        /// Type of data source (e.g., "memory", "arrow")
        source_type: String,
        /// Detailed error message
        message: String,
    },

    /// Error from serialization/deserialization of configs and reports.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from DataFusion operations.
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),
}

/// A type alias for `Result<T, ExpectationError>`.
pub type Result<T> = std::result::Result<T, ExpectationError>;

impl ExpectationError {
    /// Creates a column-not-found error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Creates an unknown-expectation-type error.
    pub fn unknown_expectation_type(expectation_type: impl Into<String>) -> Self {
        Self::UnknownExpectationType {
            expectation_type: expectation_type.into(),
        }
    }

    /// Creates an invalid configuration parameter error.
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigurationParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Creates an evaluation failure.
    pub fn evaluation_failure(
        expectation_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::EvaluationFailure {
            expectation_type: expectation_type.into(),
            message: message.into(),
        }
    }

    /// Creates a new data source error.
    pub fn data_source(source_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
        }
    }

    /// Returns true if `catch_exceptions` may turn this error into a report entry.
    pub fn is_containable(&self) -> bool {
        matches!(self, Self::EvaluationFailure { .. })
    }
}
