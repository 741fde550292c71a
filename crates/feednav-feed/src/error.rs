//! Feed access errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::table::FeedTable;

/// Failure to read from a feed source.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed directory does not exist or is not a directory.
    #[error("Feed directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// A table file could not be parsed.
    #[error("Failed to read {table} table from {path}")]
    Read {
        table: FeedTable,
        path: PathBuf,
        #[source]
        source: polars::prelude::PolarsError,
    },

    /// The source is reachable but refused or failed the query.
    #[error("Query on {table} failed: {reason}")]
    Query { table: FeedTable, reason: String },

    /// Background loading task failed to complete.
    #[error("Feed loading task failed")]
    Task {
        #[source]
        source: tokio::task::JoinError,
    },
}

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
