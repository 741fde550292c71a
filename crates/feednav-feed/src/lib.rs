//! Transit feed sources for name resolution.
//!
//! The navigation layer only needs two queries from a feed: "all rows of a
//! table" and "rows where a field equals a value". [`FeedSource`] captures
//! that capability; [`MemoryFeed`] and [`GtfsDirectoryFeed`] implement it.

pub mod error;
pub mod gtfs_dir;
pub mod memory;
pub mod source;
pub mod table;

pub use error::{FeedError, Result};
pub use gtfs_dir::GtfsDirectoryFeed;
pub use memory::MemoryFeed;
pub use source::FeedSource;
pub use table::{CellValue, FeedTable, Row, format_numeric};
