use axum::body::to_bytes;
use axum::http::StatusCode;
use records::RecordWire;

use super::*;
use crate::state::test_helpers::{sample_record, test_app_state, test_app_state_with};
use crate::store::mock::MockStore;

async fn call(state: AppState, id: &str) -> (StatusCode, Vec<u8>) {
    let response = get_record(State(state), Path(id.to_string())).await;
    let status = response.status();
    (status, to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec())
}

#[tokio::test]
async fn returns_record_wire_json() {
    let state = test_app_state(vec![sample_record("abc")]);
    let (status, body) = call(state, "abc").await;
    assert_eq!(status, StatusCode::OK);
    let wire: RecordWire = serde_json::from_slice(&body).unwrap();
    assert_eq!(wire.id, "abc");
    assert_eq!(wire.filename.as_deref(), Some("setup.json"));
    assert_eq!(wire.timestamp.as_deref(), Some("2024-03-05T14:07:09Z"));
    assert_eq!(wire.timestamp_display, "2024-03-05 14:07:09 UTC");
    assert_eq!(wire.payload["angle"], 30);
}

#[tokio::test]
async fn missing_record_is_json_not_found() {
    let state = test_app_state(vec![]);
    let (status, body) = call(state, "zzz").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let err: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert_eq!(err.code, "E_NOT_FOUND");
    assert!(!err.retryable);
}

#[tokio::test]
async fn unavailable_store_is_retryable_json() {
    let state = test_app_state_with(MockStore::never_ready(), Ok(Vec::new()));
    let (status, body) = call(state, "abc").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let err: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert_eq!(err.code, "E_STORE_UNAVAILABLE");
    assert!(err.retryable);
}

#[tokio::test]
async fn fetch_failure_is_bad_gateway_json() {
    let state = test_app_state_with(MockStore::failing_fetch("boom"), Ok(Vec::new()));
    let (status, body) = call(state, "abc").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let err: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert_eq!(err.code, "E_FETCH");
    assert!(err.message.contains("boom"));
}
