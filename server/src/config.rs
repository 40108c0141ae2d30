//! Viewer configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_FIRESTORE_DATABASE: &str = "(default)";
pub const DEFAULT_FIRESTORE_COLLECTION: &str = "experiments";
pub const DEFAULT_RECORD_DIR: &str = "./records";
pub const DEFAULT_STORE_READY_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_STORE_READY_DELAY_MS: u64 = 500;
pub const DEFAULT_STORE_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_STORE_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DOCUMENT_COMMAND: &str = "wkhtmltopdf";
pub const DEFAULT_DOCUMENT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown RECORD_STORE: {0} (expected 'firestore' or 'dir')")]
    UnknownStore(String),

    #[error("missing required env var {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirestoreConfig {
    pub base_url: String,
    pub project_id: String,
    pub database: String,
    pub collection: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Firestore(FirestoreConfig),
    Dir(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessConfig {
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl ReadinessConfig {
    #[must_use]
    pub fn delay(self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    pub command: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub port: u16,
    pub store: StoreConfig,
    pub timeouts: StoreTimeouts,
    pub readiness: ReadinessConfig,
    pub document: DocumentConfig,
}

impl ViewerConfig {
    /// Build typed viewer config from environment variables.
    ///
    /// Optional, with defaults:
    /// - `PORT`: 3000
    /// - `RECORD_STORE`: `firestore` (default) or `dir`
    /// - `FIRESTORE_DATABASE`, `FIRESTORE_COLLECTION`, `FIRESTORE_BASE_URL`, `FIRESTORE_API_KEY`
    /// - `RECORD_DIR`: `./records`
    /// - `STORE_READY_MAX_ATTEMPTS` / `STORE_READY_DELAY_MS`: 10 / 500
    /// - `STORE_REQUEST_TIMEOUT_SECS` / `STORE_CONNECT_TIMEOUT_SECS`: 30 / 10
    /// - `DOCUMENT_COMMAND` / `DOCUMENT_TIMEOUT_SECS`: `wkhtmltopdf` / 60
    ///
    /// Required for the firestore store: `FIRESTORE_PROJECT_ID`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown store kind or a missing project id.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ViewerConfig::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown store kind or a missing project id.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let store = match var("RECORD_STORE").as_deref().unwrap_or("firestore") {
            "firestore" => StoreConfig::Firestore(FirestoreConfig {
                base_url: var("FIRESTORE_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_FIRESTORE_BASE_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                project_id: var("FIRESTORE_PROJECT_ID").ok_or(ConfigError::Missing("FIRESTORE_PROJECT_ID"))?,
                database: var("FIRESTORE_DATABASE").unwrap_or_else(|| DEFAULT_FIRESTORE_DATABASE.to_string()),
                collection: var("FIRESTORE_COLLECTION").unwrap_or_else(|| DEFAULT_FIRESTORE_COLLECTION.to_string()),
                api_key: var("FIRESTORE_API_KEY"),
            }),
            "dir" => StoreConfig::Dir(PathBuf::from(
                var("RECORD_DIR").unwrap_or_else(|| DEFAULT_RECORD_DIR.to_string()),
            )),
            other => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        Ok(Self {
            port: parse_or(var("PORT"), DEFAULT_PORT),
            store,
            timeouts: StoreTimeouts {
                request_secs: parse_or(var("STORE_REQUEST_TIMEOUT_SECS"), DEFAULT_STORE_REQUEST_TIMEOUT_SECS),
                connect_secs: parse_or(var("STORE_CONNECT_TIMEOUT_SECS"), DEFAULT_STORE_CONNECT_TIMEOUT_SECS),
            },
            readiness: ReadinessConfig {
                max_attempts: parse_or(var("STORE_READY_MAX_ATTEMPTS"), DEFAULT_STORE_READY_MAX_ATTEMPTS).max(1),
                delay_ms: parse_or(var("STORE_READY_DELAY_MS"), DEFAULT_STORE_READY_DELAY_MS),
            },
            document: DocumentConfig {
                command: var("DOCUMENT_COMMAND").unwrap_or_else(|| DEFAULT_DOCUMENT_COMMAND.to_string()),
                timeout_secs: parse_or(var("DOCUMENT_TIMEOUT_SECS"), DEFAULT_DOCUMENT_TIMEOUT_SECS),
            },
        })
    }
}

/// Parse a raw value, falling back to `default` when absent or invalid.
fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.parse::<T>().ok()).unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
