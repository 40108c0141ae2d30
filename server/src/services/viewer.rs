//! Record loading: id validation, store readiness and fetch.
//!
//! DESIGN
//! ======
//! Every user-visible load failure maps to exactly one [`ViewerError`]
//! variant. A missing or unusable id never reaches the store; an
//! unavailable store is reported only after the readiness ceiling.

use records::Record;
use tracing::{error, info, warn};

use super::readiness::{Readiness, RetryPolicy};
use crate::error::ErrorCode;
use crate::store::RecordStore;

/// Longest id accepted, in bytes.
const MAX_ID_BYTES: usize = 1500;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewerError {
    #[error("No experiment ID provided in URL")]
    MissingId,

    #[error("Invalid experiment ID: {reason}")]
    InvalidId { reason: &'static str },

    #[error("Record store unavailable after {attempts} attempts")]
    StoreUnavailable { attempts: u32 },

    #[error("Experiment not found: {id}")]
    NotFound { id: String },

    #[error("Failed to load experiment data: {0}")]
    Fetch(String),
}

impl ErrorCode for ViewerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingId => "E_MISSING_ID",
            Self::InvalidId { .. } => "E_INVALID_ID",
            Self::StoreUnavailable { .. } => "E_STORE_UNAVAILABLE",
            Self::NotFound { .. } => "E_NOT_FOUND",
            Self::Fetch(_) => "E_FETCH",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. } | Self::Fetch(_))
    }
}

impl ViewerError {
    /// Panel heading shown in place of the record.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::MissingId => "No experiment ID provided",
            Self::InvalidId { .. } => "Invalid experiment ID",
            Self::StoreUnavailable { .. } => "Database unavailable",
            Self::NotFound { .. } => "Experiment not found",
            Self::Fetch(_) => "Failed to load experiment data",
        }
    }

    /// Guidance shown under the heading.
    #[must_use]
    pub fn hint(&self) -> String {
        match self {
            Self::MissingId => "Please scan a valid QR code or check the URL.".to_string(),
            Self::InvalidId { reason } => format!("The ID in the URL {reason}. Please scan the QR code again."),
            Self::StoreUnavailable { .. } => "The record store is not responding. Please try again shortly.".to_string(),
            Self::NotFound { id } => format!("No experiment with ID {id} exists."),
            Self::Fetch(detail) => detail.clone(),
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// Normalize a raw `id` query value.
///
/// # Errors
///
/// [`ViewerError::MissingId`] for absent or blank ids and
/// [`ViewerError::InvalidId`] for ids no store can hold.
pub fn validate_id(raw: Option<&str>) -> Result<&str, ViewerError> {
    let id = raw.map(str::trim).filter(|id| !id.is_empty()).ok_or(ViewerError::MissingId)?;
    if id.len() > MAX_ID_BYTES {
        return Err(ViewerError::InvalidId { reason: "is too long" });
    }
    if id == "." || id == ".." || id.contains('/') {
        return Err(ViewerError::InvalidId { reason: "contains a path separator" });
    }
    if id.chars().any(char::is_control) {
        return Err(ViewerError::InvalidId { reason: "contains control characters" });
    }
    Ok(id)
}

/// Validate the id, wait for the store and fetch the record.
///
/// # Errors
///
/// Returns the [`ViewerError`] matching the first failing step.
pub async fn load_record(store: &dyn RecordStore, policy: &RetryPolicy, raw_id: Option<&str>) -> Result<Record, ViewerError> {
    let id = validate_id(raw_id)?;

    if let Readiness::Exhausted { attempts } = policy.wait_ready(|| store.ready()).await {
        warn!(record_id = %id, attempts, "record store unavailable");
        return Err(ViewerError::StoreUnavailable { attempts });
    }

    match store.fetch(id).await {
        Ok(Some(record)) => {
            info!(record_id = %id, "record loaded");
            Ok(record)
        }
        Ok(None) => {
            warn!(record_id = %id, "record not found");
            Err(ViewerError::NotFound { id: id.to_string() })
        }
        Err(e) => {
            error!(record_id = %id, error = %e, code = e.error_code(), "record fetch failed");
            Err(ViewerError::Fetch(e.to_string()))
        }
    }
}

#[cfg(test)]
#[path = "viewer_test.rs"]
mod tests;
