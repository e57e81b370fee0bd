//! Lookup of expectations by type name.

use super::expectation::{Expectation, SharedExpectation};
use crate::expectations::builtin_expectations;
use crate::prelude::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

static BUILTINS: Lazy<ExpectationRegistry> = Lazy::new(|| {
    let mut registry = ExpectationRegistry::new();
    for expectation in builtin_expectations() {
        registry.register_shared(expectation);
    }
    registry
});

/// Maps expectation type names to checks.
///
/// Built-in and user-defined checks share one namespace; registering a check
/// under an existing name replaces the previous one. Cloning a registry is
/// cheap, the checks themselves are shared.
#[derive(Debug, Clone, Default)]
pub struct ExpectationRegistry {
    expectations: HashMap<String, SharedExpectation>,
}

impl ExpectationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in expectation.
    pub fn with_builtins() -> Self {
        BUILTINS.clone()
    }

    /// Registers a check under its [`Expectation::expectation_type`].
    ///
    /// Returns true if a check with the same name was replaced.
    pub fn register<E: Expectation + 'static>(&mut self, expectation: E) -> bool {
        self.register_shared(Arc::new(expectation))
    }

    pub fn register_shared(&mut self, expectation: SharedExpectation) -> bool {
        let name = expectation.expectation_type().to_string();
        debug!(expectation = %name, "Registered expectation");
        self.expectations.insert(name, expectation).is_some()
    }

    /// Resolves a check by name.
    pub fn get(&self, expectation_type: &str) -> Result<SharedExpectation> {
        self.expectations
            .get(expectation_type)
            .cloned()
            .ok_or_else(|| ExpectationError::unknown_expectation_type(expectation_type))
    }

    pub fn contains(&self, expectation_type: &str) -> bool {
        self.expectations.contains_key(expectation_type)
    }

    /// Returns the registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.expectations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expectations::{ColumnMapExpectation, COLUMN_TO_EXIST};

    fn positive() -> ColumnMapExpectation {
        ColumnMapExpectation::from_fn("expect_column_values_to_be_positive", |value| {
            value
                .as_f64()
                .map(|n| n > 0.0)
                .ok_or_else(|| "not numeric".to_string())
        })
    }

    #[test]
    fn test_builtins_are_registered() {
        let registry = ExpectationRegistry::with_builtins();
        assert_eq!(registry.len(), builtin_expectations().len());
        assert!(registry.contains(COLUMN_TO_EXIST));
        assert_eq!(registry.get(COLUMN_TO_EXIST).unwrap().expectation_type(), COLUMN_TO_EXIST);
    }

    #[test]
    fn test_unknown_type() {
        let registry = ExpectationRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.get("expect_magic"),
            Err(ExpectationError::UnknownExpectationType { .. })
        ));
    }

    #[test]
    fn test_user_checks_join_the_builtins() {
        let mut registry = ExpectationRegistry::with_builtins();
        assert!(!registry.register(positive()));
        assert!(registry.register(positive()));
        assert!(registry.contains("expect_column_values_to_be_positive"));

        // Other registries are unaffected.
        assert!(!ExpectationRegistry::with_builtins().contains("expect_column_values_to_be_positive"));
    }

    #[test]
    fn test_names_are_sorted() {
        let registry = ExpectationRegistry::with_builtins();
        let names = registry.names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
