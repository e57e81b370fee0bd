//! Cross-cutting expectation options carried inside kwargs.

use crate::prelude::*;
use crate::value::{param, Kwargs};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub const OUTPUT_FORMAT_KEY: &str = "output_format";
pub const MOSTLY_KEY: &str = "mostly";
pub const INCLUDE_CONFIG_KEY: &str = "include_config";
pub const CATCH_EXCEPTIONS_KEY: &str = "catch_exceptions";

/// Keys that shape a single call's output and are never stored in the config.
pub const TRANSIENT_KEYS: [&str; 3] = [OUTPUT_FORMAT_KEY, INCLUDE_CONFIG_KEY, CATCH_EXCEPTIONS_KEY];

/// Maximum number of entries in a `SUMMARY` partial exception list.
pub const PARTIAL_EXCEPTION_LIST_LIMIT: usize = 20;

/// Verbosity of a check's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputFormat {
    /// Only `success`
    BooleanOnly,
    /// `success` plus element and unexpected counts
    #[default]
    Basic,
    /// `BASIC` plus a truncated exception list
    Summary,
    /// Every field, with full exception lists
    Complete,
}

impl OutputFormat {
    /// Returns the persisted name of this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::BooleanOnly => "BOOLEAN_ONLY",
            OutputFormat::Basic => "BASIC",
            OutputFormat::Summary => "SUMMARY",
            OutputFormat::Complete => "COMPLETE",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ExpectationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "BOOLEAN_ONLY" => Ok(OutputFormat::BooleanOnly),
            "BASIC" => Ok(OutputFormat::Basic),
            "SUMMARY" => Ok(OutputFormat::Summary),
            "COMPLETE" => Ok(OutputFormat::Complete),
            other => Err(ExpectationError::invalid_parameter(
                OUTPUT_FORMAT_KEY,
                format!("unknown output format '{other}'"),
            )),
        }
    }
}

/// Options resolved from the effective kwargs of one expectation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectationOptions {
    /// Result verbosity
    pub output_format: OutputFormat,
    /// Minimum fraction of values that must pass
    pub mostly: f64,
    /// Whether the call is recorded into the dataset's config
    pub include_config: bool,
    /// Whether evaluation failures become a failed result instead of an error
    pub catch_exceptions: bool,
}

impl Default for ExpectationOptions {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Basic,
            mostly: 1.0,
            include_config: true,
            catch_exceptions: false,
        }
    }
}

impl ExpectationOptions {
    /// Parses options from kwargs, rejecting out-of-range or ill-typed values.
    pub fn from_kwargs(kwargs: &Kwargs) -> Result<Self> {
        let defaults = Self::default();

        let output_format = match param(kwargs, OUTPUT_FORMAT_KEY) {
            None => defaults.output_format,
            Some(Value::String(s)) => s.parse()?,
            Some(other) => {
                return Err(ExpectationError::invalid_parameter(
                    OUTPUT_FORMAT_KEY,
                    format!("expected a string, found {other}"),
                ))
            }
        };

        let mostly = match param(kwargs, MOSTLY_KEY) {
            None => defaults.mostly,
            Some(value) => {
                let mostly = value.as_f64().ok_or_else(|| {
                    ExpectationError::invalid_parameter(
                        MOSTLY_KEY,
                        format!("expected a number, found {value}"),
                    )
                })?;
                if !(0.0..=1.0).contains(&mostly) {
                    return Err(ExpectationError::invalid_parameter(
                        MOSTLY_KEY,
                        format!("{mostly} is outside [0, 1]"),
                    ));
                }
                mostly
            }
        };

        Ok(Self {
            output_format,
            mostly,
            include_config: flag(kwargs, INCLUDE_CONFIG_KEY, defaults.include_config)?,
            catch_exceptions: flag(kwargs, CATCH_EXCEPTIONS_KEY, defaults.catch_exceptions)?,
        })
    }
}

fn flag(kwargs: &Kwargs, name: &str, default: bool) -> Result<bool> {
    match param(kwargs, name) {
        None => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(ExpectationError::invalid_parameter(
            name,
            format!("expected a boolean, found {other}"),
        )),
    }
}

/// Overlays call-site kwargs on top of dataset defaults. Call-site values win.
pub fn merge_kwargs(defaults: &Kwargs, call: &Kwargs) -> Kwargs {
    let mut merged = defaults.clone();
    for (key, value) in call {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Returns a copy of kwargs without the transient output-shaping keys.
pub fn strip_transient(kwargs: &Kwargs) -> Kwargs {
    kwargs
        .iter()
        .filter(|(key, _)| !TRANSIENT_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::into_kwargs;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = ExpectationOptions::from_kwargs(&Kwargs::new()).unwrap();
        assert_eq!(options, ExpectationOptions::default());
        assert_eq!(options.output_format, OutputFormat::Basic);
        assert_eq!(options.mostly, 1.0);
    }

    #[test]
    fn test_parse_all_options() {
        let kwargs = into_kwargs(json!({
            "output_format": "COMPLETE",
            "mostly": 0.9,
            "include_config": false,
            "catch_exceptions": true
        }))
        .unwrap();
        let options = ExpectationOptions::from_kwargs(&kwargs).unwrap();
        assert_eq!(options.output_format, OutputFormat::Complete);
        assert_eq!(options.mostly, 0.9);
        assert!(!options.include_config);
        assert!(options.catch_exceptions);
    }

    #[test]
    fn test_mostly_out_of_range_is_rejected() {
        for bad in [json!(1.5), json!(-0.1), json!("most")] {
            let kwargs = into_kwargs(json!({ "mostly": bad })).unwrap();
            assert!(matches!(
                ExpectationOptions::from_kwargs(&kwargs),
                Err(ExpectationError::InvalidConfigurationParameter { ref parameter, .. }) if parameter == "mostly"
            ));
        }
    }

    #[test]
    fn test_unknown_output_format_is_rejected() {
        let kwargs = into_kwargs(json!({"output_format": "VERBOSE"})).unwrap();
        assert!(ExpectationOptions::from_kwargs(&kwargs).is_err());
    }

    #[test]
    fn test_output_format_serde_names() {
        assert_eq!(
            serde_json::to_value(OutputFormat::BooleanOnly).unwrap(),
            json!("BOOLEAN_ONLY")
        );
        for format in [
            OutputFormat::BooleanOnly,
            OutputFormat::Basic,
            OutputFormat::Summary,
            OutputFormat::Complete,
        ] {
            assert_eq!(format.as_str().parse::<OutputFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_merge_call_site_wins() {
        let defaults = into_kwargs(json!({"output_format": "COMPLETE", "mostly": 0.5})).unwrap();
        let call = into_kwargs(json!({"column": "a", "mostly": 0.8})).unwrap();
        let merged = merge_kwargs(&defaults, &call);
        assert_eq!(merged["output_format"], json!("COMPLETE"));
        assert_eq!(merged["mostly"], json!(0.8));
        assert_eq!(merged["column"], json!("a"));
    }

    #[test]
    fn test_strip_transient() {
        let kwargs = into_kwargs(json!({
            "column": "a",
            "mostly": 0.8,
            "output_format": "SUMMARY",
            "include_config": true,
            "catch_exceptions": false
        }))
        .unwrap();
        let stripped = strip_transient(&kwargs);
        assert_eq!(stripped, into_kwargs(json!({"column": "a", "mostly": 0.8})).unwrap());
    }
}
