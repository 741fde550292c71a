//! The navigation state manager.
//!
//! Owns the current [`PageState`], the bounded history of transitions and
//! the list of navigation handlers. Every committed transition follows the
//! same order: history, URL mirror, commit, notify.

use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use feednav_model::{BreadcrumbItem, NavigationEvent, PageState, codec};
use tracing::{debug, info, warn};

use crate::breadcrumbs::{BreadcrumbRequest, BreadcrumbTrail, build_breadcrumbs};
use crate::error::{NavigationError, Result};
use crate::history::{HistoryAdapter, NavigationHistory, RestoreSignal};
use crate::navigator::Navigator;
use crate::resolver::NameResolver;
use crate::settings::NavigatorSettings;

/// Result returned by a navigation handler.
pub type HandlerResult = std::result::Result<(), Box<dyn Error + Send + Sync>>;

type NavigationHandler = Box<dyn Fn(&NavigationEvent) -> HandlerResult + Send + Sync>;

/// Registration handle for a navigation handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

struct UrlMirror {
    adapter: Box<dyn HistoryAdapter>,
    base_path: String,
}

pub struct StateManager {
    current: PageState,
    history: NavigationHistory,
    handlers: Vec<(HandlerId, NavigationHandler)>,
    next_handler_id: u64,
    resolver: Arc<dyn NameResolver>,
    url_mirror: Option<UrlMirror>,
    generation: u64,
}

impl StateManager {
    /// Create a manager on the home page with default history length and no
    /// URL mirroring.
    pub fn new(resolver: Arc<dyn NameResolver>) -> Self {
        Self {
            current: PageState::Home,
            history: NavigationHistory::default(),
            handlers: Vec::new(),
            next_handler_id: 0,
            resolver,
            url_mirror: None,
            generation: 0,
        }
    }

    /// Create a manager configured by `settings`.
    ///
    /// URL mirroring is enabled only if the settings ask for it and an
    /// adapter is supplied.
    pub fn from_settings(
        resolver: Arc<dyn NameResolver>,
        settings: &NavigatorSettings,
        adapter: Option<Box<dyn HistoryAdapter>>,
    ) -> Self {
        let mut manager =
            Self::new(resolver).with_max_history_length(settings.history.max_length);
        if let Some(adapter) = adapter.filter(|_| settings.url.mirror) {
            manager.url_mirror = Some(UrlMirror {
                adapter,
                base_path: settings.url.base_path.clone(),
            });
        }
        manager
    }

    #[must_use]
    pub fn with_max_history_length(mut self, max_length: usize) -> Self {
        self.history = NavigationHistory::new(max_length);
        self
    }

    /// Mirror every transition into `adapter` as `base_path?query`.
    #[must_use]
    pub fn with_history_adapter(
        mut self,
        adapter: impl HistoryAdapter + 'static,
        base_path: impl Into<String>,
    ) -> Self {
        self.url_mirror = Some(UrlMirror {
            adapter: Box::new(adapter),
            base_path: base_path.into(),
        });
        self
    }

    /// Borrow the manager through the navigation facade.
    pub fn navigator(&mut self) -> Navigator<'_> {
        Navigator::new(self)
    }

    // =========================================================================
    // STATE
    // =========================================================================

    /// Owned copy of the current page state.
    pub fn page_state(&self) -> PageState {
        self.current.clone()
    }

    /// Counter bumped on every commit.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Validate and commit `next`.
    ///
    /// Committing the current state again is not deduplicated: it records a
    /// history entry and notifies handlers like any other transition.
    pub async fn set_page_state(&mut self, next: PageState) -> Result<()> {
        if let Err(source) = next.validate() {
            warn!(state = %next, %source, "rejected invalid page state");
            return Err(NavigationError::InvalidState {
                state: next,
                source,
            });
        }
        let event = NavigationEvent::new(self.current.clone(), next);
        self.history.push(event.clone());
        self.commit(event);
        Ok(())
    }

    /// Move to the most recent earlier page that differs from the current
    /// one. Returns `false` when there is none.
    pub async fn navigate_back(&mut self) -> bool {
        let Some(target) = self.history.take_back_target(&self.current) else {
            debug!(state = %self.current, "no earlier page to go back to");
            return false;
        };
        let event = NavigationEvent::new(self.current.clone(), target);
        self.commit(event);
        true
    }

    /// Whether history holds any transition.
    ///
    /// This can be `true` while [`navigate_back`](Self::navigate_back) has
    /// nowhere to go, e.g. when every entry starts at the current page.
    pub fn can_navigate_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Snapshot of the history, oldest first.
    pub fn navigation_history(&self) -> Vec<NavigationEvent> {
        self.history.to_vec()
    }

    /// Apply a host history restore.
    ///
    /// A payload is committed as is; without one the current location is
    /// decoded. Nothing is appended to history or pushed to the host.
    pub async fn restore(&mut self, signal: RestoreSignal) -> PageState {
        let target = match signal.payload {
            Some(payload) => match payload.validate() {
                Ok(()) => payload,
                Err(error) => {
                    warn!(state = %payload, %error, "invalid restore payload, decoding location");
                    self.decode_location()
                }
            },
            None => self.decode_location(),
        };
        info!(from = %self.current, to = %target, "restoring page state");
        let event = NavigationEvent::new(self.current.clone(), target.clone());
        self.apply(event);
        target
    }

    /// Current host location, if URL mirroring is enabled.
    pub fn current_location(&self) -> Option<String> {
        self.url_mirror
            .as_ref()
            .map(|mirror| mirror.adapter.current_location())
    }

    fn decode_location(&self) -> PageState {
        self.current_location()
            .map(|location| codec::decode(&location))
            .unwrap_or_default()
    }

    /// Mirror, commit and notify.
    fn commit(&mut self, event: NavigationEvent) {
        if let Some(mirror) = &self.url_mirror {
            let location = codec::encode_url(&mirror.base_path, event.to());
            mirror.adapter.push_entry(&location, event.to());
        }
        self.apply(event);
    }

    fn apply(&mut self, event: NavigationEvent) {
        debug!(from = %event.from(), to = %event.to(), "page state committed");
        self.current = event.to().clone();
        self.generation += 1;
        self.notify(&event);
    }

    // =========================================================================
    // BREADCRUMBS
    // =========================================================================

    /// Breadcrumbs for the current state.
    pub async fn breadcrumbs(&self) -> Vec<BreadcrumbItem> {
        build_breadcrumbs(&self.current, self.resolver.as_ref()).await
    }

    /// Detached build for the current state, stamped with the generation.
    pub fn breadcrumb_request(&self) -> BreadcrumbRequest {
        BreadcrumbRequest::new(self.generation, self.current.clone(), Arc::clone(&self.resolver))
    }

    /// Whether `trail` was built for the state that is still current.
    pub fn is_current(&self, trail: &BreadcrumbTrail) -> bool {
        trail.generation == self.generation
    }

    /// Swap the resolver used for future breadcrumb builds.
    pub fn replace_resolver(&mut self, resolver: Arc<dyn NameResolver>) {
        self.resolver = resolver;
        info!("name resolver replaced");
    }

    // =========================================================================
    // HANDLERS
    // =========================================================================

    /// Register a handler. Handlers run in registration order.
    pub fn add_navigation_handler<F>(&mut self, handler: F) -> HandlerId
    where
        F: Fn(&NavigationEvent) -> HandlerResult + Send + Sync + 'static,
    {
        let id = HandlerId(self.next_handler_id);
        self.next_handler_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Unregister a handler. Returns `false` if it was not registered.
    pub fn remove_navigation_handler(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    fn notify(&self, event: &NavigationEvent) {
        for (id, handler) in &self.handlers {
            match panic::catch_unwind(AssertUnwindSafe(|| handler(event))) {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    warn!(handler = id.0, %error, "navigation handler failed");
                }
                Err(_) => {
                    warn!(handler = id.0, "navigation handler panicked");
                }
            }
        }
    }
}

impl fmt::Debug for StateManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateManager")
            .field("current", &self.current)
            .field("history_len", &self.history.len())
            .field("handlers", &self.handlers.len())
            .field("url_mirror", &self.url_mirror.is_some())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
