//! Navigation facade.
//!
//! Thin, intention-named wrappers over [`StateManager`] for view code.

use feednav_model::{BreadcrumbItem, NavigationEvent, PageState, codec};
use tracing::info;

use crate::error::Result;
use crate::manager::{HandlerId, HandlerResult, StateManager};

pub struct Navigator<'m> {
    manager: &'m mut StateManager,
}

impl<'m> Navigator<'m> {
    pub fn new(manager: &'m mut StateManager) -> Self {
        Self { manager }
    }

    pub async fn navigate_to_home(&mut self) -> Result<()> {
        self.manager.set_page_state(PageState::Home).await
    }

    pub async fn navigate_to_agency(&mut self, agency_id: &str) -> Result<()> {
        self.manager.set_page_state(PageState::agency(agency_id)).await
    }

    pub async fn navigate_to_route(&mut self, route_id: &str) -> Result<()> {
        self.manager.set_page_state(PageState::route(route_id)).await
    }

    pub async fn navigate_to_timetable(
        &mut self,
        route_id: &str,
        service_id: &str,
        direction_id: Option<&str>,
    ) -> Result<()> {
        let state = PageState::timetable(route_id, service_id, direction_id.map(str::to_string));
        self.manager.set_page_state(state).await
    }

    pub async fn navigate_to_stop(&mut self, stop_id: &str) -> Result<()> {
        self.manager.set_page_state(PageState::stop(stop_id)).await
    }

    pub async fn navigate_to_service(&mut self, service_id: &str) -> Result<()> {
        self.manager.set_page_state(PageState::service(service_id)).await
    }

    pub async fn navigate_back(&mut self) -> bool {
        self.manager.navigate_back().await
    }

    pub fn current_page_state(&self) -> PageState {
        self.manager.page_state()
    }

    pub async fn current_breadcrumbs(&self) -> Vec<BreadcrumbItem> {
        self.manager.breadcrumbs().await
    }

    pub fn can_navigate_back(&self) -> bool {
        self.manager.can_navigate_back()
    }

    pub fn add_navigation_listener<F>(&mut self, listener: F) -> HandlerId
    where
        F: Fn(&NavigationEvent) -> HandlerResult + Send + Sync + 'static,
    {
        self.manager.add_navigation_handler(listener)
    }

    /// Navigate to the page named by the host's current location.
    ///
    /// Does nothing (and records nothing) when the location decodes to home
    /// or URL mirroring is off.
    pub async fn init_from_url(&mut self) -> Result<PageState> {
        match self.manager.current_location() {
            Some(location) => self.init_from_location(&location).await,
            None => Ok(self.manager.page_state()),
        }
    }

    /// Navigate to the page named by `location` unless it is home.
    pub async fn init_from_location(&mut self, location: &str) -> Result<PageState> {
        let state = codec::decode(location);
        if !state.is_home() {
            info!(%location, %state, "initialising from location");
            self.manager.set_page_state(state).await?;
        }
        Ok(self.manager.page_state())
    }
}
