//! The tabular data capability consumed by name resolution.

use async_trait::async_trait;

use crate::error::Result;
use crate::table::{FeedTable, Row};

/// Read access to the tables of a transit feed.
///
/// Implementations may be backed by memory, files or a remote service.
/// Callers treat every query as potentially slow.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Every row of `table`.
    async fn all_rows(&self, table: FeedTable) -> Result<Vec<Row>>;

    /// Rows of `table` whose `field` equals `value` exactly.
    async fn rows_where(&self, table: FeedTable, field: &str, value: &str) -> Result<Vec<Row>>;

    /// At most `limit` rows of `table`, in source order.
    async fn first_rows(&self, table: FeedTable, limit: usize) -> Result<Vec<Row>> {
        let mut rows = self.all_rows(table).await?;
        rows.truncate(limit);
        Ok(rows)
    }
}
