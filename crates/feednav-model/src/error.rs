use thiserror::Error;

use crate::page_state::PageKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("{kind} page has an empty {field}")]
    EmptyIdentifier {
        kind: PageKind,
        field: &'static str,
    },
    #[error("timetable page has an empty direction_id (omit it instead)")]
    EmptyDirection,
}

pub type Result<T> = std::result::Result<T, ModelError>;
