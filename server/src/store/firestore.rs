//! Firestore REST document store.
//!
//! Thin HTTP wrapper around `GET …/documents/{collection}/{id}`. Pure
//! URL building and response parsing are split out for testability.

use std::time::Duration;

use records::Record;
use url::Url;

use super::{RecordStore, StoreError};
use crate::config::{FirestoreConfig, StoreTimeouts};

pub struct FirestoreStore {
    http: reqwest::Client,
    config: FirestoreConfig,
    base: Url,
}

impl FirestoreStore {
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(config: FirestoreConfig, timeouts: StoreTimeouts) -> Result<Self, StoreError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| StoreError::HttpClientBuild(format!("invalid base url {}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(StoreError::HttpClientBuild(format!("invalid base url {}", config.base_url)));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| StoreError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config, base })
    }

    /// Collection URL, used as the readiness check.
    #[must_use]
    pub fn collection_url(&self) -> Url {
        let mut url = self.documents_url(&[]);
        url.query_pairs_mut().append_pair("pageSize", "1");
        self.with_key(url)
    }

    /// Document URL for a record id. The id is percent-encoded as a single
    /// path segment.
    #[must_use]
    pub fn document_url(&self, id: &str) -> Url {
        self.with_key(self.documents_url(&[id]))
    }

    fn documents_url(&self, tail: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "projects",
                self.config.project_id.as_str(),
                "databases",
                self.config.database.as_str(),
                "documents",
                self.config.collection.as_str(),
            ]);
            segments.extend(tail);
        }
        url
    }

    fn with_key(&self, mut url: Url) -> Url {
        if let Some(key) = &self.config.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        url
    }
}

#[async_trait::async_trait]
impl RecordStore for FirestoreStore {
    async fn ready(&self) -> Result<(), StoreError> {
        let response = self
            .http
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Response { status: status.as_u16(), body });
        }
        Ok(())
    }

    async fn fetch(&self, id: &str) -> Result<Option<Record>, StoreError> {
        let response = self
            .http
            .get(self.document_url(id))
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        match status {
            200 => parse_document(id, &text).map(Some),
            404 => Ok(None),
            _ => Err(StoreError::Response { status, body: text }),
        }
    }
}

/// Parse a REST document body into a record.
///
/// # Errors
///
/// Returns [`StoreError::Parse`] for invalid JSON or malformed typed values.
pub fn parse_document(id: &str, text: &str) -> Result<Record, StoreError> {
    let document: serde_json::Value = serde_json::from_str(text).map_err(|e| StoreError::Parse(e.to_string()))?;
    let fields = records::firestore::decode_document(&document).map_err(|e| StoreError::Parse(e.to_string()))?;
    Ok(Record::from_document(id, fields))
}

#[cfg(test)]
#[path = "firestore_test.rs"]
mod tests;
