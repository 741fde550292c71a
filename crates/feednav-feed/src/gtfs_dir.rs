//! GTFS directory feed source.
//!
//! Reads `agency.txt`, `routes.txt` and `stops.txt` from a GTFS directory
//! with Polars. Every column is read as text so identifiers such as `007`
//! keep their leading zeros. Missing files produce empty tables; a feed
//! without stops is still navigable.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use polars::prelude::{AnyValue, CsvReadOptions, DataFrame, PolarsError, SerReader};
use tracing::{debug, info};

use crate::error::{FeedError, Result};
use crate::source::FeedSource;
use crate::table::{CellValue, FeedTable, Row};

/// A GTFS feed loaded from a directory.
#[derive(Debug, Clone)]
pub struct GtfsDirectoryFeed {
    path: PathBuf,
    tables: HashMap<FeedTable, Vec<Row>>,
}

impl GtfsDirectoryFeed {
    /// Load a feed directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_dir() {
            return Err(FeedError::DirectoryNotFound { path });
        }

        let mut tables = HashMap::new();
        for &table in FeedTable::all() {
            let file = path.join(table.file_name());
            let rows = if file.is_file() {
                let frame = read_table(table, &file)?;
                frame_to_rows(table, &file, &frame)?
            } else {
                debug!(table = %table, path = %file.display(), "feed table missing, using empty table");
                Vec::new()
            };
            tables.insert(table, rows);
        }

        info!(
            path = %path.display(),
            agencies = tables.get(&FeedTable::Agency).map_or(0, Vec::len),
            routes = tables.get(&FeedTable::Routes).map_or(0, Vec::len),
            stops = tables.get(&FeedTable::Stops).map_or(0, Vec::len),
            "feed loaded"
        );
        Ok(Self { path, tables })
    }

    /// Load a feed directory without blocking the async runtime.
    pub async fn open_async(path: PathBuf) -> Result<Self> {
        tokio::task::spawn_blocking(move || Self::open(&path))
            .await
            .map_err(|source| FeedError::Task { source })?
    }

    /// Directory the feed was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of rows in `table`.
    pub fn row_count(&self, table: FeedTable) -> usize {
        self.tables.get(&table).map_or(0, Vec::len)
    }

    fn rows(&self, table: FeedTable) -> &[Row] {
        self.tables
            .get(&table)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[async_trait]
impl FeedSource for GtfsDirectoryFeed {
    async fn all_rows(&self, table: FeedTable) -> Result<Vec<Row>> {
        Ok(self.rows(table).to_vec())
    }

    async fn rows_where(&self, table: FeedTable, field: &str, value: &str) -> Result<Vec<Row>> {
        Ok(self
            .rows(table)
            .iter()
            .filter(|row| row.matches(field, value))
            .cloned()
            .collect())
    }

    async fn first_rows(&self, table: FeedTable, limit: usize) -> Result<Vec<Row>> {
        Ok(self.rows(table).iter().take(limit).cloned().collect())
    }
}

fn read_table(table: FeedTable, path: &Path) -> Result<DataFrame> {
    let to_error = |source: PolarsError| FeedError::Read {
        table,
        path: path.to_path_buf(),
        source,
    };
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(to_error)?
        .finish()
        .map_err(to_error)
}

fn frame_to_rows(table: FeedTable, path: &Path, frame: &DataFrame) -> Result<Vec<Row>> {
    let columns = frame.get_columns();
    let names: Vec<String> = columns
        .iter()
        .map(|column| normalize_header(column.name().as_str()))
        .collect();

    let mut rows = Vec::with_capacity(frame.height());
    for idx in 0..frame.height() {
        let mut row = Row::new();
        for (name, column) in names.iter().zip(columns) {
            let value = column.get(idx).map_err(|source| FeedError::Read {
                table,
                path: path.to_path_buf(),
                source,
            })?;
            row.insert(name.clone(), any_to_cell(value));
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Converts a Polars AnyValue into a feed cell.
fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::String(s) => text_cell(s),
        AnyValue::StringOwned(s) => text_cell(s.as_str()),
        AnyValue::Int32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int64(v) => CellValue::Number(v as f64),
        AnyValue::Float32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Float64(v) => CellValue::Number(v),
        other => CellValue::Text(other.to_string()),
    }
}

fn text_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        CellValue::Missing
    } else {
        CellValue::Text(trimmed.to_string())
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}
