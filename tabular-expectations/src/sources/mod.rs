//! Read-only table snapshots that expectations are evaluated against.
//!
//! The engine only ever reads through the [`Table`] trait. How a snapshot is
//! produced is up to the caller:
//!
//! - [`MemoryTable`]: columns of JSON values built in memory
//! - [`ArrowTable`]: one or more Arrow `RecordBatch`es, optionally collected
//!   from a DataFusion table with [`ArrowTable::from_session`]

use crate::prelude::*;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt::Debug;

mod arrow_table;
mod memory;
mod session;

pub use arrow_table::ArrowTable;
pub use memory::MemoryTable;

/// An immutable tabular snapshot.
///
/// # Examples
///
/// ```rust
/// use tabular_expectations::sources::{MemoryTable, Table};
/// use serde_json::json;
///
/// let table = MemoryTable::new()
///     .with_column("aaa", vec![json!(1), json!(2), json!(3)])
///     .unwrap();
///
/// assert!(table.has_column("aaa"));
/// assert_eq!(table.get_column("aaa").unwrap()[1], json!(2));
/// ```
pub trait Table: Debug + Send + Sync {
    /// Returns the column names in schema order.
    fn column_names(&self) -> Vec<&str>;

    /// Returns the values of a column; a value's index is its row position.
    ///
    /// Fails with [`ExpectationError::ColumnNotFound`] if the column is absent.
    fn get_column(&self, name: &str) -> Result<Cow<'_, [Value]>>;

    /// Returns the number of rows in the snapshot.
    fn row_count(&self) -> usize;

    /// Returns true if the column exists.
    fn has_column(&self, name: &str) -> bool {
        self.column_names().contains(&name)
    }
}
