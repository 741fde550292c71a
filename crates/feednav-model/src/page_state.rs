//! Navigable page states.
//!
//! `PageState` is the closed set of pages the editor can show. Each variant
//! carries exactly the identifiers needed to rebuild that page; anything
//! derivable (such as the agency owning a route) is resolved on demand.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

// =============================================================================
// PAGE STATE
// =============================================================================

/// The page the user is currently looking at.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageState {
    /// Feed overview.
    #[default]
    Home,

    /// A single agency and its routes.
    Agency { agency_id: String },

    /// A single route. The owning agency is resolved, not stored.
    Route { route_id: String },

    /// Timetable of a route for one service, optionally one direction.
    Timetable {
        route_id: String,
        service_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        direction_id: Option<String>,
    },

    /// A single stop.
    Stop { stop_id: String },

    /// A single service calendar.
    Service { service_id: String },
}

impl PageState {
    /// Create an agency page state.
    pub fn agency(agency_id: impl Into<String>) -> Self {
        Self::Agency {
            agency_id: agency_id.into(),
        }
    }

    /// Create a route page state.
    pub fn route(route_id: impl Into<String>) -> Self {
        Self::Route {
            route_id: route_id.into(),
        }
    }

    /// Create a timetable page state.
    pub fn timetable(
        route_id: impl Into<String>,
        service_id: impl Into<String>,
        direction_id: Option<String>,
    ) -> Self {
        Self::Timetable {
            route_id: route_id.into(),
            service_id: service_id.into(),
            direction_id,
        }
    }

    /// Create a stop page state.
    pub fn stop(stop_id: impl Into<String>) -> Self {
        Self::Stop {
            stop_id: stop_id.into(),
        }
    }

    /// Create a service page state.
    pub fn service(service_id: impl Into<String>) -> Self {
        Self::Service {
            service_id: service_id.into(),
        }
    }

    /// The tag of this state.
    pub fn kind(&self) -> PageKind {
        match self {
            Self::Home => PageKind::Home,
            Self::Agency { .. } => PageKind::Agency,
            Self::Route { .. } => PageKind::Route,
            Self::Timetable { .. } => PageKind::Timetable,
            Self::Stop { .. } => PageKind::Stop,
            Self::Service { .. } => PageKind::Service,
        }
    }

    /// Check if this is the home page.
    pub fn is_home(&self) -> bool {
        matches!(self, Self::Home)
    }

    /// Route identifier for route and timetable pages.
    pub fn route_id(&self) -> Option<&str> {
        match self {
            Self::Route { route_id } | Self::Timetable { route_id, .. } => Some(route_id),
            _ => None,
        }
    }

    /// Check that every identifier is present.
    ///
    /// Variants cannot carry fields of another variant, so the only way a
    /// state can be malformed is an empty identifier.
    pub fn validate(&self) -> Result<()> {
        let kind = self.kind();
        let require = |field: &'static str, value: &str| {
            if value.trim().is_empty() {
                Err(ModelError::EmptyIdentifier { kind, field })
            } else {
                Ok(())
            }
        };
        match self {
            Self::Home => Ok(()),
            Self::Agency { agency_id } => require("agency_id", agency_id),
            Self::Route { route_id } => require("route_id", route_id),
            Self::Timetable {
                route_id,
                service_id,
                direction_id,
            } => {
                require("route_id", route_id)?;
                require("service_id", service_id)?;
                match direction_id {
                    Some(direction) if direction.trim().is_empty() => {
                        Err(ModelError::EmptyDirection)
                    }
                    _ => Ok(()),
                }
            }
            Self::Stop { stop_id } => require("stop_id", stop_id),
            Self::Service { service_id } => require("service_id", service_id),
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("home"),
            Self::Agency { agency_id } => write!(f, "agency {agency_id}"),
            Self::Route { route_id } => write!(f, "route {route_id}"),
            Self::Timetable {
                route_id,
                service_id,
                direction_id,
            } => {
                write!(f, "timetable {route_id}/{service_id}")?;
                if let Some(direction) = direction_id {
                    write!(f, "/{direction}")?;
                }
                Ok(())
            }
            Self::Stop { stop_id } => write!(f, "stop {stop_id}"),
            Self::Service { service_id } => write!(f, "service {service_id}"),
        }
    }
}

// =============================================================================
// PAGE KIND
// =============================================================================

/// Tag of a [`PageState`] without its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Home,
    Agency,
    Route,
    Timetable,
    Stop,
    Service,
}

impl PageKind {
    /// Lowercase tag name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Agency => "agency",
            Self::Route => "route",
            Self::Timetable => "timetable",
            Self::Stop => "stop",
            Self::Service => "service",
        }
    }

    /// All kinds in navigation-depth order.
    pub const fn all() -> &'static [PageKind] {
        &[
            Self::Home,
            Self::Agency,
            Self::Route,
            Self::Timetable,
            Self::Stop,
            Self::Service,
        ]
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("Unknown page kind: {s}"))
    }
}
