//! Navigation error types.
//!
//! Navigation itself is fail-soft: unresolvable names become placeholders
//! and broken trails collapse to `[Home]`. The errors here surface only
//! where a caller asked for something that cannot be honored.

use std::path::PathBuf;

use feednav_model::{ModelError, PageState};
use thiserror::Error;

use crate::resolver::NameKind;

/// Navigation operation error.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// The requested page state is malformed and was not committed.
    #[error("Invalid page state {state}")]
    InvalidState {
        state: PageState,
        #[source]
        source: ModelError,
    },

    /// A name lookup failed in a way the resolver could not paper over.
    #[error("Could not resolve {kind} '{id}': {reason}")]
    Resolution {
        kind: NameKind,
        id: String,
        reason: String,
    },

    /// A breadcrumb trail could not be assembled.
    #[error("Could not build breadcrumbs for {state}: {reason}")]
    BreadcrumbBuild { state: PageState, reason: String },
}

impl NavigationError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidState { source, .. } => {
                format!("That page cannot be opened: {source}")
            }
            Self::Resolution { kind, id, .. } => {
                format!("The {kind} '{id}' could not be looked up in the feed")
            }
            Self::BreadcrumbBuild { state, .. } => {
                format!("The location of {state} could not be determined")
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidState { .. } => Some("Check that every identifier in the link is filled in."),
            Self::Resolution { .. } => Some("Check that the feed is loaded and readable."),
            Self::BreadcrumbBuild { .. } => None,
        }
    }
}

/// Result type alias for navigation operations.
pub type Result<T> = std::result::Result<T, NavigationError>;

/// Settings file error.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to {operation} settings file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize settings")]
    Serialize {
        #[source]
        source: toml::ser::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_mentions_field() {
        let error = NavigationError::InvalidState {
            state: PageState::route(""),
            source: ModelError::EmptyIdentifier {
                kind: feednav_model::PageKind::Route,
                field: "route_id",
            },
        };
        assert!(error.user_message().contains("route_id"));
        assert!(error.suggestion().is_some());
    }
}
