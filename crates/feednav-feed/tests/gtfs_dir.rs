//! Tests for loading GTFS directories.

use std::fs;
use std::path::Path;

use feednav_feed::{FeedError, FeedSource, FeedTable, GtfsDirectoryFeed};

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write file");
}

fn sample_feed(dir: &Path) {
    write(
        dir,
        "agency.txt",
        "\u{feff}agency_id,agency_name,agency_url,agency_timezone\n\
         MT,Metro Transit,https://metro.example,Europe/Oslo\n",
    );
    write(
        dir,
        "routes.txt",
        "route_id,agency_id,route_short_name,route_long_name,route_type\n\
         007,MT,7,Harbour Line,3\n\
         R2,MT,,Airport Express,2\n",
    );
}

#[test]
fn loads_tables_as_text() {
    let dir = tempfile::tempdir().expect("temp dir");
    sample_feed(dir.path());

    let feed = GtfsDirectoryFeed::open(dir.path()).expect("open feed");
    assert_eq!(feed.row_count(FeedTable::Agency), 1);
    assert_eq!(feed.row_count(FeedTable::Routes), 2);
    // stops.txt is absent
    assert_eq!(feed.row_count(FeedTable::Stops), 0);
}

#[tokio::test]
async fn queries_keep_leading_zeros_and_blank_fields() {
    let dir = tempfile::tempdir().expect("temp dir");
    sample_feed(dir.path());
    let feed = GtfsDirectoryFeed::open_async(dir.path().to_path_buf())
        .await
        .expect("open feed");

    let rows = feed
        .rows_where(FeedTable::Routes, "route_id", "007")
        .await
        .expect("query");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text("route_short_name").as_deref(), Some("7"));

    let express = feed
        .rows_where(FeedTable::Routes, "route_id", "R2")
        .await
        .expect("query");
    assert_eq!(express[0].text("route_short_name"), None);
    assert_eq!(
        express[0].text("route_long_name").as_deref(),
        Some("Airport Express")
    );

    let agencies = feed.all_rows(FeedTable::Agency).await.expect("query");
    // BOM is stripped from the first header
    assert_eq!(agencies[0].text("agency_id").as_deref(), Some("MT"));
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope");
    let err = GtfsDirectoryFeed::open(&missing).expect_err("missing dir");
    assert!(matches!(err, FeedError::DirectoryNotFound { .. }));
}
