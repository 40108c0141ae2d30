//! HTTP client for the viewer server's record API and document export.

use std::time::Duration;

use records::{Record, RecordWire};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use treeview::export::ExportKind;
use url::Url;

use crate::CliError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DOCUMENT_TIMEOUT: Duration = Duration::from_secs(90);

/// JSON error payload returned by the record API.
#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    message: String,
    #[serde(default)]
    retryable: bool,
}

pub struct ViewerClient {
    base: Url,
    http: reqwest::Client,
}

impl ViewerClient {
    /// # Errors
    ///
    /// Returns [`CliError::InvalidBaseUrl`] for URLs that cannot carry paths
    /// and [`CliError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, CliError> {
        let base = parse_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { base, http })
    }

    pub fn record_url(&self, id: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "records", id]);
        }
        url
    }

    pub fn export_url(&self, kind: ExportKind, id: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["export", kind.as_str()]);
        }
        url.query_pairs_mut().append_pair("id", id);
        url
    }

    /// Fetch one record through `GET /api/records/{id}`.
    ///
    /// # Errors
    ///
    /// [`CliError::Server`] carries the server's error code for load
    /// failures; transport and decode failures map to their own variants.
    pub async fn fetch_record(&self, id: &str) -> Result<Record, CliError> {
        let response = self.http.get(self.record_url(id)).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(server_error(status, &text));
        }
        parse_record(&text)
    }

    /// Download the converted document from `GET /export/document?id=`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Document`] with the server's detail when it
    /// cannot produce the document, and [`CliError::Server`] when the record
    /// itself fails to load.
    pub async fn download_document(&self, id: &str) -> Result<Vec<u8>, CliError> {
        let response = self
            .http
            .get(self.export_url(ExportKind::Document, id))
            .header(ACCEPT, "application/pdf, application/json;q=0.9")
            .timeout(DOCUMENT_TIMEOUT)
            .send()
            .await?;
        let status = response.status();
        let is_pdf = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/pdf"));
        if status.is_success() && is_pdf {
            return Ok(response.bytes().await?.to_vec());
        }
        let text = response.text().await.unwrap_or_default();
        Err(document_error(status, &text))
    }
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url, CliError> {
    let url = Url::parse(raw.trim()).map_err(|_| CliError::InvalidBaseUrl(raw.to_owned()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(CliError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(url)
}

pub(crate) fn parse_record(text: &str) -> Result<Record, CliError> {
    let wire: RecordWire = serde_json::from_str(text)?;
    Ok(Record::from_wire(wire))
}

pub(crate) fn server_error(status: StatusCode, text: &str) -> CliError {
    match serde_json::from_str::<ApiError>(text) {
        Ok(err) => CliError::Server {
            status: status.as_u16(),
            code: err.code,
            message: err.message,
            retryable: err.retryable,
        },
        Err(_) => CliError::Server {
            status: status.as_u16(),
            code: "E_HTTP".to_owned(),
            message: text.trim().chars().take(200).collect(),
            retryable: status.is_server_error(),
        },
    }
}

/// Error for a document download that did not yield a PDF.
pub(crate) fn document_error(status: StatusCode, text: &str) -> CliError {
    match serde_json::from_str::<ApiError>(text) {
        Ok(err) if err.code.starts_with("E_DOCUMENT") => CliError::Document(format!("{} ({})", err.message, err.code)),
        Ok(_) => server_error(status, text),
        Err(_) if status.is_success() => CliError::Document("server did not answer with a PDF".to_owned()),
        Err(_) => CliError::Document(format!("server answered HTTP {}", status.as_u16())),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
