//! Cell values and expectation keyword arguments.
//!
//! Cells, kwargs and exception list entries are all `serde_json::Value`s, which
//! keeps stored configs and reports in the same shape they are persisted in.

use crate::prelude::*;
use serde_json::{Map, Value};

/// Keyword arguments of an expectation call.
pub type Kwargs = Map<String, Value>;

/// Key naming the column an expectation applies to.
pub const COLUMN_KEY: &str = "column";

/// Returns true if the value counts as missing (excluded from predicates).
pub fn is_missing(value: &Value) -> bool {
    value.is_null()
}

/// Compares two cell values, treating numbers by magnitude so `1` equals `1.0`.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => match (l.as_f64(), r.as_f64()) {
            (Some(l), Some(r)) => l == r,
            _ => l == r,
        },
        _ => left == right,
    }
}

/// Converts an arbitrary value into kwargs. `null` is treated as no kwargs.
pub fn into_kwargs(value: Value) -> Result<Kwargs> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Kwargs::new()),
        other => Err(ExpectationError::invalid_parameter(
            "kwargs",
            format!("expected an object, found {other}"),
        )),
    }
}

/// Returns the kwargs entry unless it is absent or `null`.
pub fn param<'a>(kwargs: &'a Kwargs, name: &str) -> Option<&'a Value> {
    kwargs.get(name).filter(|value| !value.is_null())
}

/// Reads the required `column` parameter.
pub fn column_param(kwargs: &Kwargs) -> Result<&str> {
    match param(kwargs, COLUMN_KEY) {
        Some(Value::String(column)) => Ok(column.as_str()),
        Some(other) => Err(ExpectationError::invalid_parameter(
            COLUMN_KEY,
            format!("expected a column name, found {other}"),
        )),
        None => Err(ExpectationError::invalid_parameter(
            COLUMN_KEY,
            "a column name is required",
        )),
    }
}

/// Reads an optional numeric parameter.
pub fn optional_number(kwargs: &Kwargs, name: &str) -> Result<Option<f64>> {
    match param(kwargs, name) {
        None => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            ExpectationError::invalid_parameter(name, format!("expected a number, found {value}"))
        }),
    }
}

/// Reads a required string parameter.
pub fn required_str<'a>(kwargs: &'a Kwargs, name: &str) -> Result<&'a str> {
    match param(kwargs, name) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(ExpectationError::invalid_parameter(
            name,
            format!("expected a string, found {other}"),
        )),
        None => Err(ExpectationError::invalid_parameter(name, "parameter is required")),
    }
}

/// Reads a required array parameter.
pub fn required_array<'a>(kwargs: &'a Kwargs, name: &str) -> Result<&'a [Value]> {
    match param(kwargs, name) {
        Some(Value::Array(values)) => Ok(values.as_slice()),
        Some(other) => Err(ExpectationError::invalid_parameter(
            name,
            format!("expected an array, found {other}"),
        )),
        None => Err(ExpectationError::invalid_parameter(name, "parameter is required")),
    }
}

/// Reads an optional `[min_value, max_value]` pair; at least one bound is required.
pub fn bounds(kwargs: &Kwargs) -> Result<(Option<f64>, Option<f64>)> {
    let min = optional_number(kwargs, "min_value")?;
    let max = optional_number(kwargs, "max_value")?;
    match (min, max) {
        (None, None) => Err(ExpectationError::invalid_parameter(
            "min_value",
            "min_value and max_value cannot both be absent",
        )),
        (Some(min), Some(max)) if min > max => Err(ExpectationError::invalid_parameter(
            "min_value",
            format!("min_value {min} is greater than max_value {max}"),
        )),
        pair => Ok(pair),
    }
}
