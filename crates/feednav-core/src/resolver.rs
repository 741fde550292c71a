//! Display-name resolution with a write-once cache.
//!
//! Every lookup goes through the cache first. A miss queries the feed for a
//! single matching row and stores whatever comes back, including the
//! placeholder used when the feed has no such row or the query fails.
//! Lookups therefore never fail, and the second lookup of any key never
//! touches the feed.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use feednav_feed::{FeedSource, FeedTable, Row};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::error::Result;

/// Default number of stops loaded by [`CachingNameResolver::preload_cache`].
pub const DEFAULT_STOP_PRELOAD_LIMIT: usize = 1000;

/// Agency assumed for routes that do not name one.
pub const DEFAULT_AGENCY_ID: &str = "default";

// =============================================================================
// NAME KIND
// =============================================================================

/// The kinds of value the resolver caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameKind {
    Agency,
    Route,
    Stop,
    /// The agency id owning a route.
    RouteAgency,
}

impl NameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agency => "agency",
            Self::Route => "route",
            Self::Stop => "stop",
            Self::RouteAgency => "route_agency",
        }
    }

    /// Composite cache key, e.g. `route:R1`.
    pub fn cache_key(&self, id: &str) -> String {
        format!("{}:{id}", self.as_str())
    }

    /// Table holding the value.
    pub fn table(&self) -> FeedTable {
        match self {
            Self::Agency => FeedTable::Agency,
            Self::Route | Self::RouteAgency => FeedTable::Routes,
            Self::Stop => FeedTable::Stops,
        }
    }

    /// Columns tried in order when reading the value from a row.
    pub fn display_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Agency => &["agency_name", "agency_id"],
            Self::Route => &["route_short_name", "route_long_name", "route_id"],
            Self::Stop => &["stop_name", "stop_code", "stop_id"],
            Self::RouteAgency => &["agency_id"],
        }
    }

    /// Value to use when the feed has nothing for `id`.
    pub fn placeholder(&self, id: &str) -> String {
        match self {
            Self::Agency => format!("Agency {id}"),
            Self::Route => format!("Route {id}"),
            Self::Stop => format!("Stop {id}"),
            Self::RouteAgency => DEFAULT_AGENCY_ID.to_string(),
        }
    }

    fn extract(&self, row: &Row) -> Option<String> {
        row.first_text(self.display_fields())
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// RESOLVER TRAIT
// =============================================================================

/// Turns feed identifiers into display names.
///
/// The breadcrumb builder only depends on this trait. The shipped
/// implementation never returns an error; custom implementations may, in
/// which case breadcrumbs fall back to `[Home]`.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn agency_name(&self, agency_id: &str) -> Result<String>;

    async fn route_name(&self, route_id: &str) -> Result<String>;

    async fn stop_name(&self, stop_id: &str) -> Result<String>;

    /// The agency owning `route_id`.
    async fn agency_id_for_route(&self, route_id: &str) -> Result<String>;
}

// =============================================================================
// CACHING RESOLVER
// =============================================================================

/// Outcome of [`CachingNameResolver::preload_cache`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreloadSummary {
    pub agencies: usize,
    pub routes: usize,
    pub stops: usize,
    /// Tables whose bulk read failed.
    pub failures: Vec<FeedTable>,
}

impl PreloadSummary {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Feed-backed [`NameResolver`] with a process-lifetime cache.
///
/// Safe to share between tasks. The feed source can be swapped at runtime
/// with [`replace_source`](Self::replace_source), which also clears the
/// cache.
pub struct CachingNameResolver {
    source: RwLock<Arc<dyn FeedSource>>,
    cache: RwLock<HashMap<String, String>>,
    stop_preload_limit: usize,
}

impl CachingNameResolver {
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        Self {
            source: RwLock::new(source),
            cache: RwLock::new(HashMap::new()),
            stop_preload_limit: DEFAULT_STOP_PRELOAD_LIMIT,
        }
    }

    /// Set how many stops [`preload_cache`](Self::preload_cache) reads.
    #[must_use]
    pub fn with_stop_preload_limit(mut self, limit: usize) -> Self {
        self.stop_preload_limit = limit;
        self
    }

    pub fn stop_preload_limit(&self) -> usize {
        self.stop_preload_limit
    }

    /// Swap the feed and drop everything cached from the old one.
    pub fn replace_source(&self, source: Arc<dyn FeedSource>) {
        *self.source.write().unwrap_or_else(PoisonError::into_inner) = source;
        self.clear_cache();
        info!("feed source replaced, name cache cleared");
    }

    /// Drop every cached entry.
    pub fn clear_cache(&self) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let dropped = cache.len();
        cache.clear();
        debug!(dropped, "name cache cleared");
    }

    /// Number of cached entries.
    pub fn cache_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Cached value for `kind`/`id`, without querying the feed.
    pub fn cached(&self, kind: NameKind, id: &str) -> Option<String> {
        self.cached_key(&kind.cache_key(id))
    }

    /// Bulk-load agencies, routes and a bounded number of stops.
    ///
    /// Each table is read independently; a failed read is logged and
    /// recorded in the summary while the other tables still load.
    pub async fn preload_cache(&self) -> PreloadSummary {
        let source = self.source();
        let mut summary = PreloadSummary::default();

        match source.all_rows(FeedTable::Agency).await {
            Ok(rows) => {
                for row in &rows {
                    if self.preload_row(NameKind::Agency, row) {
                        summary.agencies += 1;
                    }
                }
            }
            Err(error) => {
                warn!(table = %FeedTable::Agency, %error, "preload failed");
                summary.failures.push(FeedTable::Agency);
            }
        }

        match source.all_rows(FeedTable::Routes).await {
            Ok(rows) => {
                for row in &rows {
                    if self.preload_row(NameKind::Route, row) {
                        summary.routes += 1;
                    }
                    self.preload_row(NameKind::RouteAgency, row);
                }
            }
            Err(error) => {
                warn!(table = %FeedTable::Routes, %error, "preload failed");
                summary.failures.push(FeedTable::Routes);
            }
        }

        match source
            .first_rows(FeedTable::Stops, self.stop_preload_limit)
            .await
        {
            Ok(rows) => {
                for row in &rows {
                    if self.preload_row(NameKind::Stop, row) {
                        summary.stops += 1;
                    }
                }
            }
            Err(error) => {
                warn!(table = %FeedTable::Stops, %error, "preload failed");
                summary.failures.push(FeedTable::Stops);
            }
        }

        info!(
            agencies = summary.agencies,
            routes = summary.routes,
            stops = summary.stops,
            failures = summary.failures.len(),
            "name cache preloaded"
        );
        summary
    }

    /// Cache the value of one row. Returns whether the row had an id.
    fn preload_row(&self, kind: NameKind, row: &Row) -> bool {
        let Some(id) = row.text(kind.table().id_field()) else {
            return false;
        };
        let value = kind.extract(row).unwrap_or_else(|| kind.placeholder(&id));
        self.store(kind.cache_key(&id), value);
        true
    }

    async fn lookup(&self, kind: NameKind, id: &str) -> String {
        let key = kind.cache_key(id);
        if let Some(hit) = self.cached_key(&key) {
            trace!(%key, "name cache hit");
            return hit;
        }

        let table = kind.table();
        let source = self.source();
        let resolved = match source.rows_where(table, table.id_field(), id).await {
            Ok(rows) => rows.first().and_then(|row| kind.extract(row)),
            Err(error) => {
                warn!(%key, %error, "name lookup failed, using placeholder");
                None
            }
        };

        let value = resolved.unwrap_or_else(|| {
            debug!(%key, "no feed row, using placeholder");
            kind.placeholder(id)
        });
        self.store(key, value)
    }

    fn source(&self) -> Arc<dyn FeedSource> {
        let source = self.source.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*source)
    }

    fn cached_key(&self, key: &str) -> Option<String> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Insert unless present; returns the value that ends up cached.
    fn store(&self, key: String, value: String) -> String {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(value)
            .clone()
    }
}

impl fmt::Debug for CachingNameResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingNameResolver")
            .field("cache_len", &self.cache_len())
            .field("stop_preload_limit", &self.stop_preload_limit)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl NameResolver for CachingNameResolver {
    async fn agency_name(&self, agency_id: &str) -> Result<String> {
        Ok(self.lookup(NameKind::Agency, agency_id).await)
    }

    async fn route_name(&self, route_id: &str) -> Result<String> {
        Ok(self.lookup(NameKind::Route, route_id).await)
    }

    async fn stop_name(&self, stop_id: &str) -> Result<String> {
        Ok(self.lookup(NameKind::Stop, stop_id).await)
    }

    async fn agency_id_for_route(&self, route_id: &str) -> Result<String> {
        Ok(self.lookup(NameKind::RouteAgency, route_id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_keys_are_prefixed_by_kind() {
        assert_eq!(NameKind::Route.cache_key("R1"), "route:R1");
        assert_eq!(NameKind::RouteAgency.cache_key("R1"), "route_agency:R1");
    }

    #[test]
    fn placeholders() {
        assert_eq!(NameKind::Agency.placeholder("A"), "Agency A");
        assert_eq!(NameKind::Stop.placeholder("S"), "Stop S");
        assert_eq!(NameKind::RouteAgency.placeholder("R"), DEFAULT_AGENCY_ID);
    }

    #[test]
    fn route_name_prefers_short_name() {
        let row = Row::new()
            .with("route_id", "R1")
            .with("route_short_name", "10")
            .with("route_long_name", "Harbour");
        assert_eq!(NameKind::Route.extract(&row), Some("10".to_string()));
        let row = Row::new().with("route_id", "R1");
        assert_eq!(NameKind::Route.extract(&row), Some("R1".to_string()));
    }
}
