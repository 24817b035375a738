//! Integration tests for the list fetch workflow.
//!
//! Tests the mount latch, manual refresh and failure handling against the
//! mock mess adapter.

use messadmin_core::api::mess_mock::{MockFailure, MockMessApi};
use messadmin_core::workflows::fetch_messes;
use messadmin_core::{AdminError, FetchTrigger, MealType, MessRecord, MessViewState, VerificationStatus};

fn record(id: &str, status: VerificationStatus) -> MessRecord {
    let mut r = MessRecord::new(id, format!("Mess {id}"), "Campus Road", MealType::Veg);
    r.verification_status = status;
    if status == VerificationStatus::Rejected {
        r.rejection_reason = Some("Missing licence".to_string());
    }
    r
}

fn backend() -> MockMessApi {
    MockMessApi::with_records(vec![
        record("1", VerificationStatus::Pending),
        record("2", VerificationStatus::Verified),
        record("3", VerificationStatus::Rejected),
    ])
}

#[tokio::test]
async fn test_double_mount_issues_one_request() {
    let api = backend();
    let mut state = MessViewState::new();

    let first = fetch_messes(&mut state, &api, FetchTrigger::Mount).await.unwrap();
    let second = fetch_messes(&mut state, &api, FetchTrigger::Mount).await.unwrap();

    assert_eq!(first.map(|r| r.loaded), Some(3));
    assert!(second.is_none());
    assert_eq!(api.fetch_count(), 1);
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_refresh_always_fetches() {
    let api = backend();
    let mut state = MessViewState::new();

    fetch_messes(&mut state, &api, FetchTrigger::Mount).await.unwrap();
    fetch_messes(&mut state, &api, FetchTrigger::Refresh).await.unwrap();
    fetch_messes(&mut state, &api, FetchTrigger::Refresh).await.unwrap();

    assert_eq!(api.fetch_count(), 3);
}

#[tokio::test]
async fn test_refresh_before_mount_leaves_latch_unset() {
    let api = backend();
    let mut state = MessViewState::new();

    fetch_messes(&mut state, &api, FetchTrigger::Refresh).await.unwrap();
    assert!(!state.has_mounted());

    let mounted = fetch_messes(&mut state, &api, FetchTrigger::Mount).await.unwrap();
    assert!(mounted.is_some());
    assert_eq!(api.fetch_count(), 2);
}

#[tokio::test]
async fn test_fetch_replaces_collection() {
    let api = backend();
    let mut state = MessViewState::new();
    fetch_messes(&mut state, &api, FetchTrigger::Mount).await.unwrap();

    api.set_records(vec![record("4", VerificationStatus::Pending)]);
    let report = fetch_messes(&mut state, &api, FetchTrigger::Refresh)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(report.loaded, 1);
    let ids: Vec<&str> = state.messes().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["4"]);
}

#[tokio::test]
async fn test_failed_fetch_keeps_last_known_good() {
    let api = backend();
    let mut state = MessViewState::new();
    fetch_messes(&mut state, &api, FetchTrigger::Mount).await.unwrap();
    let before = state.messes().to_vec();

    api.fail_fetch(MockFailure::Status(503));
    let result = fetch_messes(&mut state, &api, FetchTrigger::Refresh).await;

    assert!(matches!(result, Err(AdminError::HttpStatus { status: 503, .. })));
    assert_eq!(state.messes(), before.as_slice());
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_failed_mount_still_latches() {
    let api = backend();
    api.fail_fetch(MockFailure::Transport);
    let mut state = MessViewState::new();

    let result = fetch_messes(&mut state, &api, FetchTrigger::Mount).await;
    assert!(matches!(result, Err(AdminError::Transport(_))));
    assert!(state.messes().is_empty());

    api.clear_failures();
    assert!(fetch_messes(&mut state, &api, FetchTrigger::Mount).await.unwrap().is_none());
    assert!(fetch_messes(&mut state, &api, FetchTrigger::Refresh).await.unwrap().is_some());
    assert_eq!(state.messes().len(), 3);
}

#[tokio::test]
async fn test_partitions_after_fetch() {
    let api = backend();
    let mut state = MessViewState::new();
    fetch_messes(&mut state, &api, FetchTrigger::Mount).await.unwrap();

    let counts = state.counts();
    assert_eq!(counts.pending, 1);
    assert_eq!(counts.verified, 1);
    assert_eq!(counts.rejected, 1);
    assert_eq!(counts.total(), state.messes().len());
    assert_eq!(state.partition(VerificationStatus::Rejected)[0].id, "3");
}
