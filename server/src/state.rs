//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is built once in `main` and injected into Axum handlers via
//! the `State` extractor. It is immutable: the record store, readiness
//! policy and document generator are all behind `Arc` or `Copy`, so cloning
//! per request is cheap and there is no shared mutable state.

use std::sync::Arc;

use crate::config::ViewerConfig;
use crate::services::document::{CommandGenerator, DocumentGenerator};
use crate::services::readiness::RetryPolicy;
use crate::store::{self, RecordStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub retry: RetryPolicy,
    pub documents: Arc<dyn DocumentGenerator>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, retry: RetryPolicy, documents: Arc<dyn DocumentGenerator>) -> Self {
        Self { store, retry, documents }
    }

    /// Build the state described by a parsed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured store cannot be constructed.
    pub fn from_config(config: &ViewerConfig) -> Result<Self, StoreError> {
        let store = store::from_config(&config.store, config.timeouts)?;
        let documents = Arc::new(CommandGenerator::new(&config.document));
        tracing::info!(command = documents.program(), "document generator configured");
        Ok(Self::new(store, RetryPolicy::from(config.readiness), documents))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
