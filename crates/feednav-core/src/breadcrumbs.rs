//! Breadcrumb trails.
//!
//! | Page      | Trail                                            |
//! |-----------|--------------------------------------------------|
//! | home      | (empty)                                          |
//! | agency    | Home > agency                                    |
//! | route     | Home > agency > route                            |
//! | timetable | Home > agency > route > `service (Direction d)`  |
//! | stop      | Home > stop                                      |
//! | service   | Home > service id                                |
//!
//! The agency of a route page is resolved through the route, never read
//! from the page state.

use std::sync::Arc;

use feednav_model::{BreadcrumbItem, PageState};
use tracing::warn;

use crate::error::Result;
use crate::resolver::NameResolver;

/// Label of the final timetable crumb.
///
/// Services have no display name of their own, so the identifier is used.
pub fn timetable_label(service_id: &str, direction_id: Option<&str>) -> String {
    match direction_id {
        Some(direction) => format!("{service_id} (Direction {direction})"),
        None => service_id.to_string(),
    }
}

/// Build the trail for `state`, propagating resolver failures.
pub async fn try_build_breadcrumbs(
    state: &PageState,
    resolver: &dyn NameResolver,
) -> Result<Vec<BreadcrumbItem>> {
    match state {
        PageState::Home => Ok(Vec::new()),
        PageState::Agency { agency_id } => {
            let name = resolver.agency_name(agency_id).await?;
            Ok(vec![
                BreadcrumbItem::home(),
                BreadcrumbItem::new(name, state.clone()),
            ])
        }
        PageState::Route { route_id } => route_trail(route_id, resolver).await,
        PageState::Timetable {
            route_id,
            service_id,
            direction_id,
        } => {
            let mut items = route_trail(route_id, resolver).await?;
            items.push(BreadcrumbItem::new(
                timetable_label(service_id, direction_id.as_deref()),
                state.clone(),
            ));
            Ok(items)
        }
        PageState::Stop { stop_id } => {
            let name = resolver.stop_name(stop_id).await?;
            Ok(vec![
                BreadcrumbItem::home(),
                BreadcrumbItem::new(name, state.clone()),
            ])
        }
        PageState::Service { service_id } => Ok(vec![
            BreadcrumbItem::home(),
            BreadcrumbItem::new(service_id.clone(), state.clone()),
        ]),
    }
}

/// Build the trail for `state`.
///
/// Never fails: if the resolver errors the trail degrades to `[Home]`.
pub async fn build_breadcrumbs(state: &PageState, resolver: &dyn NameResolver) -> Vec<BreadcrumbItem> {
    match try_build_breadcrumbs(state, resolver).await {
        Ok(items) => items,
        Err(error) => {
            warn!(%state, %error, "breadcrumb build failed, falling back to home");
            vec![BreadcrumbItem::home()]
        }
    }
}

async fn route_trail(route_id: &str, resolver: &dyn NameResolver) -> Result<Vec<BreadcrumbItem>> {
    let agency_id = resolver.agency_id_for_route(route_id).await?;
    let agency_name = resolver.agency_name(&agency_id).await?;
    let route_name = resolver.route_name(route_id).await?;
    Ok(vec![
        BreadcrumbItem::home(),
        BreadcrumbItem::new(agency_name, PageState::agency(agency_id)),
        BreadcrumbItem::new(route_name, PageState::route(route_id)),
    ])
}

// =============================================================================
// GENERATION-STAMPED BUILDS
// =============================================================================

/// A detached breadcrumb build for one committed page state.
///
/// Obtained from [`StateManager::breadcrumb_request`](crate::StateManager::breadcrumb_request).
/// It owns everything it needs, so it can run after the manager has moved
/// on; compare the result with
/// [`StateManager::is_current`](crate::StateManager::is_current) before
/// showing it.
pub struct BreadcrumbRequest {
    generation: u64,
    state: PageState,
    resolver: Arc<dyn NameResolver>,
}

impl BreadcrumbRequest {
    pub(crate) fn new(generation: u64, state: PageState, resolver: Arc<dyn NameResolver>) -> Self {
        Self {
            generation,
            state,
            resolver,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub async fn build(self) -> BreadcrumbTrail {
        let items = build_breadcrumbs(&self.state, self.resolver.as_ref()).await;
        BreadcrumbTrail {
            generation: self.generation,
            state: self.state,
            items,
        }
    }
}

/// A built trail tagged with the state generation it was built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbTrail {
    pub generation: u64,
    pub state: PageState,
    pub items: Vec<BreadcrumbItem>,
}
