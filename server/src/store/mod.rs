//! Record store seam.
//!
//! DESIGN
//! ======
//! Handlers never talk to a backend directly. They go through the
//! [`RecordStore`] trait so the hosted document database, a local directory
//! of JSON files and test doubles are interchangeable.

pub mod dir;
pub mod firestore;
#[cfg(test)]
pub mod mock;

use std::sync::Arc;

use records::Record;

use crate::config::{StoreConfig, StoreTimeouts};
use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request to the store failed before a response arrived.
    #[error("store request failed: {0}")]
    Request(String),

    /// The store answered with a non-success status.
    #[error("store response error: status {status}: {body}")]
    Response { status: u16, body: String },

    /// The stored document could not be decoded.
    #[error("record decode failed: {0}")]
    Parse(String),

    /// Reading from the local record directory failed.
    #[error("record read failed: {0}")]
    Io(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_STORE_REQUEST",
            Self::Response { .. } => "E_STORE_RESPONSE",
            Self::Parse(_) => "E_STORE_PARSE",
            Self::Io(_) => "E_STORE_IO",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Response { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Read-only access to stored experiment records.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Check that the store can serve requests.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] describing why the store is not ready.
    async fn ready(&self) -> Result<(), StoreError>;

    /// Fetch one record by id. `Ok(None)` when no such record exists.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the request fails or the document is
    /// malformed.
    async fn fetch(&self, id: &str) -> Result<Option<Record>, StoreError>;
}

/// Build the configured store.
///
/// # Errors
///
/// Returns an error if the HTTP client or base URL is invalid.
pub fn from_config(store: &StoreConfig, timeouts: StoreTimeouts) -> Result<Arc<dyn RecordStore>, StoreError> {
    Ok(match store {
        StoreConfig::Firestore(config) => Arc::new(firestore::FirestoreStore::new(config.clone(), timeouts)?),
        StoreConfig::Dir(root) => Arc::new(dir::DirStore::new(root.clone())),
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
