//! Local directory store: one `<id>.json` document per record.

use std::io::ErrorKind;
use std::path::PathBuf;

use records::Record;

use super::{RecordStore, StoreError};

pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Path of a record file, or `None` for ids that would leave the root.
    fn record_path(&self, id: &str) -> Option<PathBuf> {
        let plain = !id.is_empty()
            && id != "."
            && id != ".."
            && !id.contains(['/', '\\'])
            && !id.chars().any(char::is_control);
        plain.then(|| self.root.join(format!("{id}.json")))
    }
}

#[async_trait::async_trait]
impl RecordStore for DirStore {
    async fn ready(&self) -> Result<(), StoreError> {
        let meta = tokio::fs::metadata(&self.root)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {e}", self.root.display())))?;
        if meta.is_dir() {
            Ok(())
        } else {
            Err(StoreError::Io(format!("{} is not a directory", self.root.display())))
        }
    }

    async fn fetch(&self, id: &str) -> Result<Option<Record>, StoreError> {
        let Some(path) = self.record_path(id) else {
            return Ok(None);
        };
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(format!("{}: {e}", path.display()))),
        };
        let document: serde_json::Value = serde_json::from_str(&text).map_err(|e| StoreError::Parse(e.to_string()))?;
        Record::from_json_document(id, &document)
            .map(Some)
            .map_err(|e| StoreError::Parse(e.to_string()))
    }
}

#[cfg(test)]
#[path = "dir_test.rs"]
mod tests;
