//! Tests for breadcrumb construction.

mod common;

use std::sync::Arc;

use common::{FailingResolver, sample_manager, sample_resolver};
use feednav_core::{StateManager, build_breadcrumbs, try_build_breadcrumbs};
use feednav_model::{BreadcrumbItem, HOME_LABEL, PageState};

fn labels(items: &[BreadcrumbItem]) -> Vec<&str> {
    items.iter().map(|item| item.label.as_str()).collect()
}

#[tokio::test]
async fn home_has_no_breadcrumbs() {
    let resolver = sample_resolver();
    assert!(build_breadcrumbs(&PageState::Home, resolver.as_ref()).await.is_empty());
}

#[tokio::test]
async fn trails_per_page_kind() {
    let resolver = sample_resolver();
    let cases = [
        (PageState::agency("A1"), vec![HOME_LABEL, "Harbour Transit"]),
        (PageState::route("R1"), vec![HOME_LABEL, "Harbour Transit", "10"]),
        (
            PageState::timetable("R2", "WK", None),
            vec![HOME_LABEL, "Harbour Transit", "Hill Loop", "WK"],
        ),
        (PageState::stop("S1"), vec![HOME_LABEL, "Central"]),
        (PageState::service("WK"), vec![HOME_LABEL, "WK"]),
    ];
    for (state, expected) in cases {
        let items = build_breadcrumbs(&state, resolver.as_ref()).await;
        assert_eq!(labels(&items), expected, "trail for {state}");
    }
}

#[tokio::test]
async fn route_trail_links_to_resolved_agency() {
    let resolver = sample_resolver();
    let items = build_breadcrumbs(&PageState::route("R1"), resolver.as_ref()).await;
    assert_eq!(items[0], BreadcrumbItem::home());
    assert_eq!(items[1].page_state, PageState::agency("A1"));
    assert_eq!(items[2].page_state, PageState::route("R1"));
}

#[tokio::test]
async fn route_without_agency_uses_default_agency() {
    let resolver = sample_resolver();
    let items = build_breadcrumbs(&PageState::route("R3"), resolver.as_ref()).await;
    assert_eq!(labels(&items), vec![HOME_LABEL, "Agency default", "3"]);
    assert_eq!(items[1].page_state, PageState::agency("default"));
}

#[tokio::test]
async fn unknown_ids_render_placeholders() {
    let resolver = sample_resolver();
    let items = build_breadcrumbs(&PageState::stop("S404"), resolver.as_ref()).await;
    assert_eq!(labels(&items), vec![HOME_LABEL, "Stop S404"]);
}

#[tokio::test]
async fn timetable_after_route_ends_with_direction() {
    let mut manager = sample_manager();
    let mut navigator = manager.navigator();
    navigator.navigate_to_route("R1").await.unwrap();
    navigator
        .navigate_to_timetable("R1", "S1", Some("0"))
        .await
        .unwrap();

    let items = navigator.current_breadcrumbs().await;
    assert_eq!(items.last().map(|item| item.label.as_str()), Some("S1 (Direction 0)"));
    assert_eq!(
        items.last().map(|item| item.page_state.clone()),
        Some(PageState::timetable("R1", "S1", Some("0".into())))
    );
}

#[tokio::test]
async fn resolver_failure_falls_back_to_home() {
    let resolver = FailingResolver;
    let state = PageState::timetable("R1", "WK", None);

    assert!(try_build_breadcrumbs(&state, &resolver).await.is_err());
    assert_eq!(
        build_breadcrumbs(&state, &resolver).await,
        vec![BreadcrumbItem::home()]
    );
    // Service trails need no lookups.
    assert_eq!(
        labels(&build_breadcrumbs(&PageState::service("WK"), &resolver).await),
        vec![HOME_LABEL, "WK"]
    );
}

#[tokio::test]
async fn replacing_the_resolver_changes_future_trails() {
    let mut manager = StateManager::new(Arc::new(FailingResolver));
    manager.set_page_state(PageState::stop("S1")).await.unwrap();
    assert_eq!(manager.breadcrumbs().await, vec![BreadcrumbItem::home()]);

    manager.replace_resolver(sample_resolver());
    assert_eq!(labels(&manager.breadcrumbs().await), vec![HOME_LABEL, "Central"]);
}
