use std::path::PathBuf;

use super::*;
use crate::config::FirestoreConfig;

#[test]
fn error_codes_are_stable() {
    assert_eq!(StoreError::Request("x".into()).error_code(), "E_STORE_REQUEST");
    assert_eq!(StoreError::Response { status: 403, body: String::new() }.error_code(), "E_STORE_RESPONSE");
    assert_eq!(StoreError::Parse("x".into()).error_code(), "E_STORE_PARSE");
    assert_eq!(StoreError::Io("x".into()).error_code(), "E_STORE_IO");
    assert_eq!(StoreError::HttpClientBuild("x".into()).error_code(), "E_HTTP_CLIENT_BUILD");
}

#[test]
fn transient_failures_are_retryable() {
    assert!(StoreError::Request("timeout".into()).retryable());
    assert!(StoreError::Response { status: 503, body: String::new() }.retryable());
    assert!(StoreError::Response { status: 429, body: String::new() }.retryable());
    assert!(!StoreError::Response { status: 403, body: String::new() }.retryable());
    assert!(!StoreError::Parse("x".into()).retryable());
}

#[test]
fn from_config_builds_either_backend() {
    let timeouts = StoreTimeouts { request_secs: 5, connect_secs: 1 };
    assert!(from_config(&StoreConfig::Dir(PathBuf::from("./records")), timeouts).is_ok());
    let firestore = StoreConfig::Firestore(FirestoreConfig {
        base_url: "https://firestore.test/v1".into(),
        project_id: "lab".into(),
        database: "(default)".into(),
        collection: "experiments".into(),
        api_key: None,
    });
    assert!(from_config(&firestore, timeouts).is_ok());
}
