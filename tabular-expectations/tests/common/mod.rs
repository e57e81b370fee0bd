//! Shared fixtures for integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use tabular_expectations::core::ExpectationsConfig;
use tabular_expectations::sources::MemoryTable;

pub const TITANIC_COLUMNS: [&str; 6] = ["Name", "PClass", "Age", "Sex", "Survived", "SexCode"];

/// Row position of the malformed `PClass` value in [`titanic`].
pub const BAD_PCLASS_INDEX: usize = 6;

/// A ten-passenger extract of the Titanic manifest, with one malformed
/// `PClass` ("*") and one missing age.
pub fn titanic() -> MemoryTable {
    MemoryTable::from_columns([
        (
            "Name",
            strings(&[
                "Allen, Miss Elisabeth Walton",
                "Allison, Miss Helen Loraine",
                "Brown, Mrs Thomas William Solomon",
                "Abbing, Mr Anthony",
                "Abbott, Master Eugene Joseph",
                "Angle, Mrs William A",
                "Jacobsohn, Mr Samuel",
                "Andrews, Mr Thomas, jr",
                "Ali, Mr Ahmed",
                "Aks, Master Philip",
            ]),
        ),
        (
            "PClass",
            strings(&["1st", "1st", "2nd", "3rd", "3rd", "2nd", "*", "1st", "3rd", "3rd"]),
        ),
        (
            "Age",
            vec![
                json!(29),
                json!(2),
                json!(60),
                json!(42),
                json!(null),
                json!(36),
                json!(26.5),
                json!(39),
                json!(24),
                json!(0.83),
            ],
        ),
        (
            "Sex",
            strings(&[
                "female", "female", "female", "male", "male", "female", "male", "male", "male",
                "male",
            ]),
        ),
        ("Survived", ints(&[1, 0, 1, 0, 0, 1, 0, 0, 0, 1])),
        ("SexCode", ints(&[1, 1, 1, 0, 0, 1, 0, 0, 0, 0])),
    ])
    .unwrap()
}

/// The persisted Titanic config: one existence check per column plus a
/// set-membership check on `PClass`.
pub fn titanic_config_json() -> Value {
    let mut expectations: Vec<Value> = TITANIC_COLUMNS
        .iter()
        .map(|column| {
            json!({"expectation_type": "expect_column_to_exist", "kwargs": {"column": column}})
        })
        .collect();
    expectations.push(json!({
        "expectation_type": "expect_column_values_to_be_in_set",
        "kwargs": {"column": "PClass", "values_set": ["1st", "2nd", "3rd"]}
    }));
    json!({ "expectations": expectations })
}

pub fn titanic_config() -> ExpectationsConfig {
    ExpectationsConfig::from_serializable(titanic_config_json()).unwrap()
}

pub fn strings(values: &[&str]) -> Vec<Value> {
    values.iter().map(|v| json!(v)).collect()
}

pub fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().map(|v| json!(v)).collect()
}
