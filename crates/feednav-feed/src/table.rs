//! Feed tables and rows.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Tables the navigation layer reads from a transit feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedTable {
    Agency,
    Routes,
    Stops,
}

impl FeedTable {
    /// Table name as used by GTFS.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agency => "agency",
            Self::Routes => "routes",
            Self::Stops => "stops",
        }
    }

    /// File name inside a GTFS directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Agency => "agency.txt",
            Self::Routes => "routes.txt",
            Self::Stops => "stops.txt",
        }
    }

    /// Primary identifier column.
    pub fn id_field(&self) -> &'static str {
        match self {
            Self::Agency => "agency_id",
            Self::Routes => "route_id",
            Self::Stops => "stop_id",
        }
    }

    pub const fn all() -> &'static [FeedTable] {
        &[Self::Agency, Self::Routes, Self::Stops]
    }
}

impl fmt::Display for FeedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl CellValue {
    /// Render the value the way it would appear in the source file.
    ///
    /// Returns `None` for missing or blank values.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(text) if !text.trim().is_empty() => Some(text.clone()),
            Self::Text(_) | Self::Missing => None,
            Self::Number(value) => Some(format_numeric(*value)),
        }
    }

    /// Exact-equality match against a textual filter value.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Text(text) => text == value,
            Self::Number(number) => format_numeric(*number) == value,
            Self::Missing => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A row of named fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(field, text)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut row = Self::new();
        for (field, value) in pairs {
            row.insert(field, CellValue::from(value));
        }
        row
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(field, value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: CellValue) {
        self.cells.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.cells.get(field)
    }

    /// Non-blank textual value of a field.
    pub fn text(&self, field: &str) -> Option<String> {
        self.cells.get(field).and_then(CellValue::as_text)
    }

    /// First non-blank value among `fields`, in order.
    pub fn first_text(&self, fields: &[&str]) -> Option<String> {
        fields.iter().find_map(|field| self.text(field))
    }

    /// Check if `field` equals `value` exactly.
    pub fn matches(&self, field: &str, value: &str) -> bool {
        self.cells
            .get(field)
            .is_some_and(|cell| cell.matches(value))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Formats a floating-point number without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_without_trailing_zeros() {
        assert_eq!(format_numeric(3.0), "3");
        assert_eq!(format_numeric(2.50), "2.5");
        assert_eq!(format_numeric(100.0), "100");
    }

    #[test]
    fn first_text_skips_blank_fields() {
        let row = Row::new()
            .with("route_short_name", "  ")
            .with("route_long_name", "Harbour Line")
            .with("route_id", "R1");
        assert_eq!(
            row.first_text(&["route_short_name", "route_long_name", "route_id"]),
            Some("Harbour Line".to_string())
        );
        assert_eq!(row.first_text(&["route_desc"]), None);
    }

    #[test]
    fn numeric_cells_match_textual_filters() {
        let row = Row::new().with("direction_id", 1.0);
        assert!(row.matches("direction_id", "1"));
        assert!(!row.matches("direction_id", "1.0"));
        assert!(!row.matches("missing", "1"));
    }
}
