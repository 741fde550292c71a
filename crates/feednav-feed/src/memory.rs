//! In-memory feed source.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use crate::error::Result;
use crate::source::FeedSource;
use crate::table::{FeedTable, Row};

/// Feed tables held in memory.
///
/// Clones share the same tables, so a test or an editor can keep a handle
/// and mutate the data a resolver is reading from.
#[derive(Debug, Clone, Default)]
pub struct MemoryFeed {
    tables: Arc<RwLock<HashMap<FeedTable, Vec<Row>>>>,
}

impl MemoryFeed {
    /// Create an empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style row insert.
    #[must_use]
    pub fn with_row(self, table: FeedTable, row: Row) -> Self {
        self.push_row(table, row);
        self
    }

    /// Append a row to `table`.
    pub fn push_row(&self, table: FeedTable, row: Row) {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        tables.entry(table).or_default().push(row);
    }

    /// Replace every row of `table`.
    pub fn replace_table(&self, table: FeedTable, rows: Vec<Row>) {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        tables.insert(table, rows);
    }

    /// Drop all tables.
    pub fn clear(&self) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of rows in `table`.
    pub fn row_count(&self, table: FeedTable) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&table)
            .map_or(0, Vec::len)
    }

    fn snapshot(&self, table: FeedTable) -> Vec<Row> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&table)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl FeedSource for MemoryFeed {
    async fn all_rows(&self, table: FeedTable) -> Result<Vec<Row>> {
        Ok(self.snapshot(table))
    }

    async fn rows_where(&self, table: FeedTable, field: &str, value: &str) -> Result<Vec<Row>> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        Ok(tables
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| row.matches(field, value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn first_rows(&self, table: FeedTable, limit: usize) -> Result<Vec<Row>> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        Ok(tables
            .get(&table)
            .map(|rows| rows.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
