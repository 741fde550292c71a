//! Navigation core for the transit feed editor.
//!
//! # Architecture
//!
//! - [`resolver`]: cached identifier-to-name resolution over a feed
//! - [`breadcrumbs`]: trail construction from a page state
//! - [`manager`]: the state manager owning current page, history and handlers
//! - [`history`]: bounded transition log and host history integration
//! - [`navigator`]: intention-named facade for view code
//! - [`settings`]: TOML-backed configuration

pub mod breadcrumbs;
pub mod error;
pub mod history;
pub mod manager;
pub mod navigator;
pub mod resolver;
pub mod settings;

pub use breadcrumbs::{
    BreadcrumbRequest, BreadcrumbTrail, build_breadcrumbs, timetable_label, try_build_breadcrumbs,
};
pub use error::{NavigationError, Result, SettingsError};
pub use history::{
    DEFAULT_MAX_HISTORY_LENGTH, HistoryAdapter, HistoryEntry, MemoryHistory, NavigationHistory,
    RestoreSignal,
};
pub use manager::{HandlerId, HandlerResult, StateManager};
pub use navigator::Navigator;
pub use resolver::{
    CachingNameResolver, DEFAULT_AGENCY_ID, DEFAULT_STOP_PRELOAD_LIMIT, NameKind, NameResolver,
    PreloadSummary,
};
pub use settings::{CacheSettings, HistorySettings, NavigatorSettings, UrlSettings};
