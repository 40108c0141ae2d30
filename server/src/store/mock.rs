//! In-memory store double for handler and service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use records::Record;

use super::{RecordStore, StoreError};

#[derive(Default)]
pub struct MockStore {
    records: HashMap<String, Record>,
    /// Readiness checks that fail before the store reports ready.
    not_ready_for: u32,
    /// Error returned by every fetch, when set.
    fetch_error: Option<String>,
    pub ready_calls: AtomicU32,
    pub fetched: Mutex<Vec<String>>,
}

impl MockStore {
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        Self { records: records.into_iter().map(|r| (r.id.clone(), r)).collect(), ..Self::default() }
    }

    #[must_use]
    pub fn never_ready() -> Self {
        Self { not_ready_for: u32::MAX, ..Self::default() }
    }

    #[must_use]
    pub fn not_ready_for(mut self, checks: u32) -> Self {
        self.not_ready_for = checks;
        self
    }

    #[must_use]
    pub fn failing_fetch(message: &str) -> Self {
        Self { fetch_error: Some(message.to_string()), ..Self::default() }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl RecordStore for MockStore {
    async fn ready(&self) -> Result<(), StoreError> {
        let n = self.ready_calls.fetch_add(1, Ordering::SeqCst);
        if n < self.not_ready_for {
            return Err(StoreError::Request("connection refused".into()));
        }
        Ok(())
    }

    async fn fetch(&self, id: &str) -> Result<Option<Record>, StoreError> {
        self.fetched.lock().unwrap().push(id.to_string());
        if let Some(message) = &self.fetch_error {
            return Err(StoreError::Request(message.clone()));
        }
        Ok(self.records.get(id).cloned())
    }
}
