//! Snapshots of DataFusion tables.

use super::{ArrowTable, Table};
use crate::prelude::*;
use datafusion::prelude::SessionContext;
use std::sync::Arc;
use tracing::{info, instrument};

impl ArrowTable {
    /// Collects a table registered in `ctx` into a snapshot.
    ///
    /// The snapshot is taken once; later changes to the registered table are
    /// not visible through it.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use tabular_expectations::sources::{ArrowTable, Table};
    /// use datafusion::prelude::*;
    ///
    /// # async fn example() -> tabular_expectations::prelude::Result<()> {
    /// let ctx = SessionContext::new();
    /// ctx.register_csv("titanic", "titanic.csv", CsvReadOptions::new()).await?;
    ///
    /// let table = ArrowTable::from_session(&ctx, "titanic").await?;
    /// println!("{} rows", table.row_count());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(ctx))]
    pub async fn from_session(ctx: &SessionContext, table_name: &str) -> Result<Self> {
        let df = ctx.table(table_name).await?;
        let schema = Arc::new(df.schema().as_arrow().clone());
        let batches = df.collect().await?;
        let table = Self::try_new(schema, batches)?;
        info!(
            table.name = %table_name,
            table.rows = table.row_count(),
            "Collected DataFusion table snapshot"
        );
        Ok(table)
    }
}
