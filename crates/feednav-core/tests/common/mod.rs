//! Shared fixtures for navigation tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use feednav_core::{CachingNameResolver, NameKind, NameResolver, NavigationError, StateManager};
use feednav_feed::{FeedError, FeedSource, FeedTable, MemoryFeed, Row};

/// Feed wrapper counting queries, with optional per-table failures.
pub struct CountingFeed {
    inner: MemoryFeed,
    queries: AtomicUsize,
    failing: HashSet<FeedTable>,
}

impl CountingFeed {
    pub fn new(inner: MemoryFeed) -> Self {
        Self {
            inner,
            queries: AtomicUsize::new(0),
            failing: HashSet::new(),
        }
    }

    pub fn failing_on(mut self, table: FeedTable) -> Self {
        self.failing.insert(table);
        self
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn check(&self, table: FeedTable) -> Result<(), FeedError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&table) {
            Err(FeedError::Query {
                table,
                reason: "unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FeedSource for CountingFeed {
    async fn all_rows(&self, table: FeedTable) -> Result<Vec<Row>, FeedError> {
        self.check(table)?;
        self.inner.all_rows(table).await
    }

    async fn rows_where(
        &self,
        table: FeedTable,
        field: &str,
        value: &str,
    ) -> Result<Vec<Row>, FeedError> {
        self.check(table)?;
        self.inner.rows_where(table, field, value).await
    }
}

/// A small feed: one agency with two routes and a few stops.
pub fn sample_feed() -> MemoryFeed {
    MemoryFeed::new()
        .with_row(
            FeedTable::Agency,
            Row::from_pairs([("agency_id", "A1"), ("agency_name", "Harbour Transit")]),
        )
        .with_row(
            FeedTable::Routes,
            Row::from_pairs([
                ("route_id", "R1"),
                ("agency_id", "A1"),
                ("route_short_name", "10"),
                ("route_long_name", "Harbour Line"),
            ]),
        )
        .with_row(
            FeedTable::Routes,
            Row::from_pairs([
                ("route_id", "R2"),
                ("agency_id", "A1"),
                ("route_long_name", "Hill Loop"),
            ]),
        )
        .with_row(
            FeedTable::Routes,
            Row::from_pairs([("route_id", "R3"), ("route_short_name", "3")]),
        )
        .with_row(
            FeedTable::Stops,
            Row::from_pairs([("stop_id", "S1"), ("stop_name", "Central")]),
        )
        .with_row(
            FeedTable::Stops,
            Row::from_pairs([("stop_id", "S2"), ("stop_code", "2002")]),
        )
        .with_row(FeedTable::Stops, Row::from_pairs([("stop_id", "S3")]))
}

pub fn sample_resolver() -> Arc<CachingNameResolver> {
    Arc::new(CachingNameResolver::new(Arc::new(sample_feed())))
}

pub fn sample_manager() -> StateManager {
    StateManager::new(sample_resolver())
}

/// Resolver whose every lookup fails.
pub struct FailingResolver;

fn failure(kind: NameKind, id: &str) -> NavigationError {
    NavigationError::Resolution {
        kind,
        id: id.to_string(),
        reason: "resolver offline".to_string(),
    }
}

#[async_trait]
impl NameResolver for FailingResolver {
    async fn agency_name(&self, agency_id: &str) -> feednav_core::Result<String> {
        Err(failure(NameKind::Agency, agency_id))
    }

    async fn route_name(&self, route_id: &str) -> feednav_core::Result<String> {
        Err(failure(NameKind::Route, route_id))
    }

    async fn stop_name(&self, stop_id: &str) -> feednav_core::Result<String> {
        Err(failure(NameKind::Stop, stop_id))
    }

    async fn agency_id_for_route(&self, route_id: &str) -> feednav_core::Result<String> {
        Err(failure(NameKind::RouteAgency, route_id))
    }
}
