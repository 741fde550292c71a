//! Tests for the in-memory feed.

use feednav_feed::{FeedSource, FeedTable, MemoryFeed, Row};

fn route(id: &str, agency: &str) -> Row {
    Row::from_pairs([("route_id", id), ("agency_id", agency)])
}

#[tokio::test]
async fn filters_rows_by_exact_match() {
    let feed = MemoryFeed::new()
        .with_row(FeedTable::Routes, route("R1", "A1"))
        .with_row(FeedTable::Routes, route("R10", "A1"))
        .with_row(FeedTable::Routes, route("R2", "A2"));

    let rows = feed
        .rows_where(FeedTable::Routes, "route_id", "R1")
        .await
        .expect("query");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text("agency_id").as_deref(), Some("A1"));

    let by_agency = feed
        .rows_where(FeedTable::Routes, "agency_id", "A1")
        .await
        .expect("query");
    assert_eq!(by_agency.len(), 2);
}

#[tokio::test]
async fn unknown_tables_are_empty() {
    let feed = MemoryFeed::new();
    assert!(feed.all_rows(FeedTable::Stops).await.expect("query").is_empty());
    assert!(
        feed.rows_where(FeedTable::Agency, "agency_id", "A")
            .await
            .expect("query")
            .is_empty()
    );
}

#[tokio::test]
async fn clones_share_tables() {
    let feed = MemoryFeed::new();
    let handle = feed.clone();
    handle.push_row(FeedTable::Agency, Row::from_pairs([("agency_id", "A1")]));

    assert_eq!(feed.row_count(FeedTable::Agency), 1);
    feed.clear();
    assert_eq!(handle.row_count(FeedTable::Agency), 0);
}

#[tokio::test]
async fn first_rows_respects_limit() {
    let feed = MemoryFeed::new();
    feed.replace_table(
        FeedTable::Stops,
        (0..5)
            .map(|n| Row::new().with("stop_id", format!("S{n}")))
            .collect(),
    );
    let rows = feed.first_rows(FeedTable::Stops, 3).await.expect("query");
    let ids: Vec<String> = rows.iter().filter_map(|row| row.text("stop_id")).collect();
    assert_eq!(ids, vec!["S0", "S1", "S2"]);
}
