//! Property-based tests for the expectations config and the validation runner.
//!
//! ## Properties
//!
//! - Declaring N distinct `(type, column)` pairs lists them in declaration order
//! - Re-declaring a pair never changes the length or moves the entry
//! - Configs survive the persisted shape unchanged
//! - The failures-only report is exactly the failed subset of the full report
//! - Column-map counts are consistent with the data

use proptest::prelude::*;
use serde_json::{json, Value};
use tabular_expectations::core::{ExpectationSpec, ExpectationsConfig};
use tabular_expectations::prelude::*;
use tabular_expectations::value::into_kwargs;

const TYPES: [&str; 3] = [
    "expect_column_to_exist",
    "expect_column_values_to_be_in_set",
    "expect_column_values_to_be_between",
];

fn spec(type_index: usize, column: &str, marker: u32) -> ExpectationSpec {
    ExpectationSpec::new(
        TYPES[type_index],
        into_kwargs(json!({"column": column, "marker": marker})).unwrap(),
    )
}

/// Distinct `(type index, column)` pairs in a random order.
fn distinct_pairs() -> impl Strategy<Value = Vec<(usize, String)>> {
    prop::collection::btree_set((0..TYPES.len(), "[a-e]{1,3}"), 1..20)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

/// A column of small integers with some missing values.
fn column_values() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(
        prop_oneof![
            4 => (0i64..10).prop_map(Value::from),
            1 => Just(Value::Null),
        ],
        0..60,
    )
}

proptest! {
    #[test]
    fn test_declaration_order_is_preserved(pairs in distinct_pairs()) {
        let mut config = ExpectationsConfig::new();
        for (type_index, column) in &pairs {
            prop_assert!(!config.add_or_replace(spec(*type_index, column, 0)));
        }

        let listed: Vec<(&str, Option<&str>)> = config
            .iter()
            .map(|s| (s.expectation_type.as_str(), s.column()))
            .collect();
        let declared: Vec<(&str, Option<&str>)> = pairs
            .iter()
            .map(|(t, c)| (TYPES[*t], Some(c.as_str())))
            .collect();
        prop_assert_eq!(listed, declared);
    }

    #[test]
    fn test_redeclaration_replaces_in_place(
        pairs in distinct_pairs(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut config = ExpectationsConfig::new();
        for (type_index, column) in &pairs {
            config.add_or_replace(spec(*type_index, column, 0));
        }
        let k = pick.index(pairs.len());
        let (type_index, column) = &pairs[k];

        prop_assert!(config.add_or_replace(spec(*type_index, column, 1)));
        prop_assert_eq!(config.len(), pairs.len());
        prop_assert_eq!(&config.list()[k].kwargs["marker"], &json!(1));
        prop_assert_eq!(config.list()[k].column(), Some(column.as_str()));
    }

    #[test]
    fn test_serializable_round_trip(pairs in distinct_pairs(), extra_rows in 0u32..5) {
        let mut config = ExpectationsConfig::new();
        for (type_index, column) in &pairs {
            config.add_or_replace(spec(*type_index, column, extra_rows));
        }
        for _ in 0..extra_rows {
            config.add_or_replace(ExpectationSpec::new(
                "expect_table_row_count_to_be_between",
                into_kwargs(json!({"min_value": 0})).unwrap(),
            ));
        }

        let restored = ExpectationsConfig::from_serializable(config.to_serializable()).unwrap();
        prop_assert_eq!(&restored, &config);

        let reparsed = ExpectationsConfig::from_json_str(&config.to_json_string().unwrap()).unwrap();
        prop_assert_eq!(reparsed, config);
    }

    #[test]
    fn test_failures_only_subset_law(
        columns in prop::collection::vec(column_values(), 1..4),
        allowed in prop::collection::btree_set(0i64..10, 0..10),
        mostly in 0.0f64..=1.0,
    ) {
        let rows = columns.iter().map(Vec::len).min().unwrap_or(0);
        let mut table = MemoryTable::new();
        for (i, values) in columns.into_iter().enumerate() {
            table.set_column(format!("c{i}"), values[..rows].to_vec()).unwrap();
        }

        let mut dataset = Dataset::new();
        let values_set: Vec<Value> = allowed.into_iter().map(Value::from).collect();
        for name in table.column_names().iter().map(|s| s.to_string()).collect::<Vec<_>>() {
            dataset.expect(
                &table,
                "expect_column_values_to_be_in_set",
                json!({"column": name, "values_set": values_set, "mostly": mostly}),
            ).unwrap();
            dataset.expect(
                &table,
                "expect_column_values_to_be_between",
                json!({"column": name, "max_value": 5}),
            ).unwrap();
        }

        let full = dataset.validate(&table, ValidateOptions::default()).unwrap();
        let failures = dataset
            .validate(&table, ValidateOptions::new().only_return_failures(true))
            .unwrap();

        let expected: Vec<_> = full.failures().cloned().collect();
        prop_assert_eq!(failures.into_results(), expected);
        prop_assert_eq!(
            full,
            dataset.validate(&table, ValidateOptions::default()).unwrap()
        );
    }

    #[test]
    fn test_column_map_counts(values in column_values(), max_value in 0i64..10) {
        let table = MemoryTable::new().with_column("n", values.clone()).unwrap();
        let mut dataset = Dataset::new();
        let result = dataset.expect(
            &table,
            "expect_column_values_to_be_between",
            json!({"column": "n", "max_value": max_value, "output_format": "COMPLETE"}),
        ).unwrap();

        let expected_indices: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.as_i64().is_some_and(|n| n > max_value))
            .map(|(i, _)| i)
            .collect();
        let missing = values.iter().filter(|v| v.is_null()).count();

        prop_assert_eq!(result.details.element_count, Some(values.len()));
        prop_assert_eq!(result.details.missing_count, Some(missing));
        prop_assert_eq!(result.success, expected_indices.is_empty());
        prop_assert_eq!(result.details.exception_index_list, Some(expected_indices));
    }
}
