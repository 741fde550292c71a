//! Tests for the navigation facade.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{sample_manager, sample_resolver};
use feednav_core::{MemoryHistory, NavigationError, StateManager};
use feednav_model::PageState;

#[tokio::test]
async fn navigate_helpers_build_states() {
    let mut manager = sample_manager();
    let mut navigator = manager.navigator();

    navigator.navigate_to_agency("A1").await.unwrap();
    assert_eq!(navigator.current_page_state(), PageState::agency("A1"));
    navigator.navigate_to_service("WK").await.unwrap();
    assert_eq!(navigator.current_page_state(), PageState::service("WK"));
    navigator.navigate_to_stop("S1").await.unwrap();
    navigator.navigate_to_timetable("R1", "WK", None).await.unwrap();
    assert_eq!(
        navigator.current_page_state(),
        PageState::timetable("R1", "WK", None)
    );
    navigator.navigate_to_home().await.unwrap();
    assert_eq!(navigator.current_page_state(), PageState::Home);
    assert!(navigator.can_navigate_back());

    assert_eq!(manager.navigation_history().len(), 5);
}

#[tokio::test]
async fn empty_ids_are_rejected() {
    let mut manager = sample_manager();
    let mut navigator = manager.navigator();
    let result = navigator.navigate_to_stop("").await;
    assert!(matches!(result, Err(NavigationError::InvalidState { .. })));
    assert!(!navigator.can_navigate_back());
}

#[tokio::test]
async fn back_through_facade() {
    let mut manager = sample_manager();
    let mut navigator = manager.navigator();
    navigator.navigate_to_route("R1").await.unwrap();
    navigator.navigate_to_stop("S1").await.unwrap();

    assert!(navigator.navigate_back().await);
    assert_eq!(navigator.current_page_state(), PageState::route("R1"));
}

#[tokio::test]
async fn listener_receives_events() {
    let mut manager = sample_manager();
    let mut navigator = manager.navigator();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    navigator.add_navigation_listener(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    navigator.navigate_to_stop("S1").await.unwrap();
    navigator.navigate_back().await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn init_from_url_navigates_to_linked_page() {
    let host = MemoryHistory::new("/");
    host.load_url("/?agency=A1&route=R1");
    let mut manager = StateManager::new(sample_resolver()).with_history_adapter(host.clone(), "/");

    let state = manager.navigator().init_from_url().await.unwrap();
    assert_eq!(state, PageState::route("R1"));
    assert_eq!(manager.navigation_history().len(), 1);

    let labels: Vec<_> = manager
        .breadcrumbs()
        .await
        .into_iter()
        .map(|item| item.label)
        .collect();
    assert_eq!(labels, vec!["Home", "Harbour Transit", "10"]);
}

#[tokio::test]
async fn init_from_home_url_records_nothing() {
    let host = MemoryHistory::new("/?unknown=1");
    let mut manager = StateManager::new(sample_resolver()).with_history_adapter(host.clone(), "/");

    let state = manager.navigator().init_from_url().await.unwrap();
    assert_eq!(state, PageState::Home);
    assert!(manager.navigation_history().is_empty());
    assert_eq!(host.entries().len(), 1);
}

#[tokio::test]
async fn init_from_location_without_adapter() {
    let mut manager = sample_manager();
    let state = manager
        .navigator()
        .init_from_location("?route=R2&service=SAT&direction=1")
        .await
        .unwrap();
    assert_eq!(state, PageState::timetable("R2", "SAT", Some("1".into())));
}
