//! In-memory column store.

use super::Table;
use crate::prelude::*;
use serde_json::Value;
use std::borrow::Cow;

/// A column-oriented table of JSON values held in memory.
///
/// All columns have the same length. Replacing a column between expectation
/// calls is how callers change the data a dataset is checked against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryTable {
    columns: Vec<(String, Vec<Value>)>,
    row_count: usize,
}

impl MemoryTable {
    /// Creates a table with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from `(name, values)` pairs.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Value>)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, values) in columns {
            table.set_column(name, values)?;
        }
        Ok(table)
    }

    /// Adds or replaces a column, returning the table.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<Value>) -> Result<Self> {
        self.set_column(name, values)?;
        Ok(self)
    }

    /// Adds a column, or replaces the existing column of the same name in place.
    pub fn set_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        let has_other_columns = self.columns.iter().any(|(existing, _)| *existing != name);
        if has_other_columns && values.len() != self.row_count {
            return Err(ExpectationError::data_source(
                "memory",
                format!(
                    "column '{name}' has {} values but the table has {} rows",
                    values.len(),
                    self.row_count
                ),
            ));
        }

        self.row_count = values.len();
        match self.columns.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = values,
            None => self.columns.push((name, values)),
        }
        Ok(())
    }
}

impl Table for MemoryTable {
    fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn get_column(&self, name: &str) -> Result<Cow<'_, [Value]>> {
        self.columns
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, values)| Cow::Borrowed(values.as_slice()))
            .ok_or_else(|| ExpectationError::column_not_found(name))
    }

    fn row_count(&self) -> usize {
        self.row_count
    }

    fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(existing, _)| existing == name)
    }
}
