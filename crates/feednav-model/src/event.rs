//! Navigation events and breadcrumb items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::page_state::PageState;

/// Label of the root breadcrumb.
pub const HOME_LABEL: &str = "Home";

/// A committed transition between two page states.
///
/// Fields are private so an event cannot be altered after it is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEvent {
    from: PageState,
    to: PageState,
    timestamp: DateTime<Utc>,
}

impl NavigationEvent {
    /// Create an event stamped with the current time.
    pub fn new(from: PageState, to: PageState) -> Self {
        Self::at(from, to, Utc::now())
    }

    /// Create an event with an explicit timestamp.
    pub fn at(from: PageState, to: PageState, timestamp: DateTime<Utc>) -> Self {
        Self {
            from,
            to,
            timestamp,
        }
    }

    pub fn from(&self) -> &PageState {
        &self.from
    }

    pub fn to(&self) -> &PageState {
        &self.to
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Check whether the transition left the page unchanged.
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    pub label: String,
    pub page_state: PageState,
}

impl BreadcrumbItem {
    pub fn new(label: impl Into<String>, page_state: PageState) -> Self {
        Self {
            label: label.into(),
            page_state,
        }
    }

    /// The root item every non-home trail starts with.
    pub fn home() -> Self {
        Self::new(HOME_LABEL, PageState::Home)
    }
}
