use std::collections::HashMap;

use super::*;

fn config(vars: &[(&str, &str)]) -> Result<ViewerConfig, ConfigError> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    ViewerConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn firestore_defaults() {
    let cfg = config(&[("FIRESTORE_PROJECT_ID", "lab")]).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(
        cfg.store,
        StoreConfig::Firestore(FirestoreConfig {
            base_url: DEFAULT_FIRESTORE_BASE_URL.into(),
            project_id: "lab".into(),
            database: "(default)".into(),
            collection: "experiments".into(),
            api_key: None,
        })
    );
    assert_eq!(cfg.readiness, ReadinessConfig { max_attempts: 10, delay_ms: 500 });
    assert_eq!(cfg.readiness.delay(), Duration::from_millis(500));
    assert_eq!(cfg.timeouts, StoreTimeouts { request_secs: 30, connect_secs: 10 });
    assert_eq!(cfg.document, DocumentConfig { command: "wkhtmltopdf".into(), timeout_secs: 60 });
}

#[test]
fn firestore_requires_project_id() {
    assert_eq!(config(&[]), Err(ConfigError::Missing("FIRESTORE_PROJECT_ID")));
    assert_eq!(config(&[("FIRESTORE_PROJECT_ID", "  ")]), Err(ConfigError::Missing("FIRESTORE_PROJECT_ID")));
}

#[test]
fn firestore_overrides() {
    let cfg = config(&[
        ("FIRESTORE_PROJECT_ID", "lab"),
        ("FIRESTORE_DATABASE", "staging"),
        ("FIRESTORE_COLLECTION", "runs"),
        ("FIRESTORE_API_KEY", "k-123"),
        ("FIRESTORE_BASE_URL", "http://127.0.0.1:8080/v1/"),
    ])
    .unwrap();
    let StoreConfig::Firestore(fs) = cfg.store else {
        panic!("expected firestore store");
    };
    assert_eq!(fs.base_url, "http://127.0.0.1:8080/v1");
    assert_eq!(fs.database, "staging");
    assert_eq!(fs.collection, "runs");
    assert_eq!(fs.api_key.as_deref(), Some("k-123"));
}

#[test]
fn dir_store_uses_record_dir() {
    let cfg = config(&[("RECORD_STORE", "dir"), ("RECORD_DIR", "/srv/records")]).unwrap();
    assert_eq!(cfg.store, StoreConfig::Dir(PathBuf::from("/srv/records")));

    let cfg = config(&[("RECORD_STORE", "dir")]).unwrap();
    assert_eq!(cfg.store, StoreConfig::Dir(PathBuf::from(DEFAULT_RECORD_DIR)));
}

#[test]
fn unknown_store_is_rejected() {
    assert_eq!(config(&[("RECORD_STORE", "s3")]), Err(ConfigError::UnknownStore("s3".into())));
}

#[test]
fn numeric_overrides_parse() {
    let cfg = config(&[
        ("RECORD_STORE", "dir"),
        ("PORT", "8081"),
        ("STORE_READY_MAX_ATTEMPTS", "3"),
        ("STORE_READY_DELAY_MS", "25"),
        ("STORE_REQUEST_TIMEOUT_SECS", "5"),
        ("DOCUMENT_COMMAND", "/usr/local/bin/html2pdf"),
        ("DOCUMENT_TIMEOUT_SECS", "7"),
    ])
    .unwrap();
    assert_eq!(cfg.port, 8081);
    assert_eq!(cfg.readiness, ReadinessConfig { max_attempts: 3, delay_ms: 25 });
    assert_eq!(cfg.timeouts.request_secs, 5);
    assert_eq!(cfg.document.command, "/usr/local/bin/html2pdf");
    assert_eq!(cfg.document.timeout_secs, 7);
}

#[test]
fn invalid_numbers_fall_back_to_defaults() {
    let cfg = config(&[("RECORD_STORE", "dir"), ("PORT", "eighty"), ("STORE_READY_DELAY_MS", "-1")]).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.readiness.delay_ms, DEFAULT_STORE_READY_DELAY_MS);
}

#[test]
fn zero_attempts_still_checks_once() {
    let cfg = config(&[("RECORD_STORE", "dir"), ("STORE_READY_MAX_ATTEMPTS", "0")]).unwrap();
    assert_eq!(cfg.readiness.max_attempts, 1);
}
