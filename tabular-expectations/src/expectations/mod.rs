//! The built-in expectation catalog and the column-map adapter.
//!
//! Column-level checks are predicates wrapped by [`ColumnMapExpectation`].
//! User-defined checks are built the same way and are indistinguishable from
//! the built-ins once registered.

use crate::core::SharedExpectation;
use std::sync::Arc;

mod column_map;
mod table;
mod values;

pub use column_map::{ColumnMapExpectation, PredicateOutcome, ValuePredicate};
pub use table::{
    ColumnExistsExpectation, RowCountExpectation, COLUMN_TO_EXIST, TABLE_ROW_COUNT_TO_BE_BETWEEN,
};
pub use values::{
    value_lengths_to_be_between, values_to_be_between, values_to_be_in_set,
    values_to_match_regex, values_to_not_be_in_set, VALUES_TO_BE_BETWEEN, VALUES_TO_BE_IN_SET,
    VALUES_TO_MATCH_REGEX, VALUES_TO_NOT_BE_IN_SET, VALUE_LENGTHS_TO_BE_BETWEEN,
};

/// Returns one instance of every built-in expectation.
pub fn builtin_expectations() -> Vec<SharedExpectation> {
    vec![
        Arc::new(ColumnExistsExpectation),
        Arc::new(RowCountExpectation),
        Arc::new(values_to_be_between()),
        Arc::new(values_to_be_in_set()),
        Arc::new(values_to_not_be_in_set()),
        Arc::new(values_to_match_regex()),
        Arc::new(value_lengths_to_be_between()),
    ]
}
