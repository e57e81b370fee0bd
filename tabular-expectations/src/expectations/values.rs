//! Built-in column-map expectations.

use super::column_map::{ColumnMapExpectation, ValuePredicate};
use crate::prelude::*;
use crate::value::{bounds, required_array, required_str, values_equal};
use regex::Regex;
use serde_json::Value;

pub const VALUES_TO_BE_BETWEEN: &str = "expect_column_values_to_be_between";
pub const VALUES_TO_BE_IN_SET: &str = "expect_column_values_to_be_in_set";
pub const VALUES_TO_NOT_BE_IN_SET: &str = "expect_column_values_to_not_be_in_set";
pub const VALUES_TO_MATCH_REGEX: &str = "expect_column_values_to_match_regex";
pub const VALUE_LENGTHS_TO_BE_BETWEEN: &str = "expect_column_value_lengths_to_be_between";

fn within(n: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |min| n >= min) && max.map_or(true, |max| n <= max)
}

/// Numeric values within `[min_value, max_value]` (either bound may be absent).
pub fn values_to_be_between() -> ColumnMapExpectation {
    ColumnMapExpectation::with_params(VALUES_TO_BE_BETWEEN, |kwargs| {
        let (min, max) = bounds(kwargs)?;
        Ok(Box::new(move |value: &Value| {
            value
                .as_f64()
                .map(|n| within(n, min, max))
                .ok_or_else(|| format!("{value} is not numeric"))
        }) as ValuePredicate)
    })
    .with_description("Checks that values lie between min_value and max_value, inclusive")
}

/// Values that are members of `values_set`.
pub fn values_to_be_in_set() -> ColumnMapExpectation {
    ColumnMapExpectation::with_params(VALUES_TO_BE_IN_SET, |kwargs| {
        let set = required_array(kwargs, "values_set")?.to_vec();
        Ok(Box::new(move |value: &Value| {
            Ok(set.iter().any(|member| values_equal(member, value)))
        }) as ValuePredicate)
    })
    .with_description("Checks that values are members of values_set")
}

/// Values that are not members of `values_set`.
pub fn values_to_not_be_in_set() -> ColumnMapExpectation {
    ColumnMapExpectation::with_params(VALUES_TO_NOT_BE_IN_SET, |kwargs| {
        let set = required_array(kwargs, "values_set")?.to_vec();
        Ok(Box::new(move |value: &Value| {
            Ok(!set.iter().any(|member| values_equal(member, value)))
        }) as ValuePredicate)
    })
    .with_description("Checks that values are not members of values_set")
}

/// String values matching `regex` anywhere in the string.
pub fn values_to_match_regex() -> ColumnMapExpectation {
    ColumnMapExpectation::with_params(VALUES_TO_MATCH_REGEX, |kwargs| {
        let pattern = required_str(kwargs, "regex")?;
        let regex = Regex::new(pattern)
            .map_err(|e| ExpectationError::invalid_parameter("regex", e.to_string()))?;
        Ok(Box::new(move |value: &Value| {
            value
                .as_str()
                .map(|s| regex.is_match(s))
                .ok_or_else(|| format!("{value} is not a string"))
        }) as ValuePredicate)
    })
    .with_description("Checks that string values match a regular expression")
}

/// String values whose character length is within `[min_value, max_value]`.
pub fn value_lengths_to_be_between() -> ColumnMapExpectation {
    ColumnMapExpectation::with_params(VALUE_LENGTHS_TO_BE_BETWEEN, |kwargs| {
        let (min, max) = bounds(kwargs)?;
        Ok(Box::new(move |value: &Value| {
            value
                .as_str()
                .map(|s| within(s.chars().count() as f64, min, max))
                .ok_or_else(|| format!("{value} is not a string"))
        }) as ValuePredicate)
    })
    .with_description("Checks that string lengths lie between min_value and max_value")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Expectation, ExpectationOptions, RawCheckResult};
    use crate::sources::MemoryTable;
    use crate::value::into_kwargs;
    use serde_json::json;

    fn run(expectation: ColumnMapExpectation, values: Vec<Value>, kwargs: Value) -> Result<RawCheckResult> {
        let table = MemoryTable::new().with_column("col", values)?;
        let mut kwargs = into_kwargs(kwargs)?;
        kwargs.insert("column".to_string(), json!("col"));
        expectation.evaluate(&table, &kwargs, &ExpectationOptions::default())
    }

    fn rejected(raw: RawCheckResult) -> Vec<usize> {
        raw.column_map.unwrap().exception_index_list
    }

    #[test]
    fn test_between_inclusive_bounds() {
        let values = vec![json!(1), json!(2), json!(3), json!(4), json!(5)];
        let raw = run(values_to_be_between(), values, json!({"min_value": 1, "max_value": 5})).unwrap();
        assert!(raw.success);

        let raw = run(
            values_to_be_between(),
            vec![json!(0), json!(2.5), json!(9)],
            json!({"min_value": 1}),
        )
        .unwrap();
        assert_eq!(rejected(raw), vec![0]);
    }

    #[test]
    fn test_between_requires_a_bound_and_numbers() {
        assert!(matches!(
            run(values_to_be_between(), vec![json!(1)], json!({})),
            Err(ExpectationError::InvalidConfigurationParameter { .. })
        ));
        assert!(matches!(
            run(values_to_be_between(), vec![json!("x")], json!({"max_value": 1})),
            Err(ExpectationError::EvaluationFailure { .. })
        ));
    }

    #[test]
    fn test_in_set_and_not_in_set() {
        let values = vec![json!("1st"), json!("*"), json!("3rd"), Value::Null];
        let set = json!({"values_set": ["1st", "2nd", "3rd"]});

        let raw = run(values_to_be_in_set(), values.clone(), set.clone()).unwrap();
        assert!(!raw.success);
        let stats = raw.column_map.unwrap();
        assert_eq!(stats.exception_list, vec![json!("*")]);
        assert_eq!(stats.exception_index_list, vec![1]);
        assert_eq!(stats.missing_count, 1);

        let raw = run(values_to_not_be_in_set(), values, set).unwrap();
        assert_eq!(rejected(raw), vec![0, 2]);
    }

    #[test]
    fn test_in_set_matches_numbers_by_value() {
        let raw = run(
            values_to_be_in_set(),
            vec![json!(1.0), json!(2)],
            json!({"values_set": [1, 2]}),
        )
        .unwrap();
        assert!(raw.success);
    }

    #[test]
    fn test_match_regex() {
        let raw = run(
            values_to_match_regex(),
            vec![json!("Allen, Miss Elisabeth"), json!("Nobody")],
            json!({"regex": ","}),
        )
        .unwrap();
        assert_eq!(rejected(raw), vec![1]);

        assert!(matches!(
            run(values_to_match_regex(), vec![], json!({"regex": "("})),
            Err(ExpectationError::InvalidConfigurationParameter { .. })
        ));
    }

    #[test]
    fn test_value_lengths() {
        let raw = run(
            value_lengths_to_be_between(),
            vec![json!("ab"), json!("abcd"), json!("é")],
            json!({"min_value": 1, "max_value": 3}),
        )
        .unwrap();
        assert_eq!(rejected(raw), vec![1]);
    }
}
