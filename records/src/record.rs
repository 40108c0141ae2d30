//! The fetched record and its metadata fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::{DecodeError, Node};

const UNKNOWN: &str = "Unknown";

// =============================================================================
// TIMESTAMP
// =============================================================================

/// When a record was captured, as far as the document tells.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordTimestamp {
    Instant(OffsetDateTime),
    /// A value that looked like a date but did not parse; shown verbatim.
    Raw(String),
}

impl RecordTimestamp {
    /// Human-readable form, `YYYY-MM-DD HH:MM:SS UTC` for instants.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Instant(at) => at
                .to_offset(UtcOffset::UTC)
                .format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC"))
                .unwrap_or_else(|_| at.to_string()),
            Self::Raw(raw) => raw.clone(),
        }
    }

    /// RFC 3339 for instants, the raw text otherwise.
    #[must_use]
    pub fn to_wire(&self) -> String {
        match self {
            Self::Instant(at) => at.format(&Rfc3339).unwrap_or_else(|_| at.to_string()),
            Self::Raw(raw) => raw.clone(),
        }
    }

    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        OffsetDateTime::parse(raw, &Rfc3339).map_or_else(|_| Self::Raw(raw.to_owned()), Self::Instant)
    }

    /// Interpret a document field as a timestamp.
    ///
    /// Accepts RFC 3339 text, epoch milliseconds, `{seconds, nanoseconds}`
    /// mappings (with or without leading underscores) and store timestamps.
    #[must_use]
    pub fn from_node(node: &Node) -> Option<Self> {
        match node {
            Node::Text(text) | Node::Opaque { text, .. } => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                Some(Self::from_wire(trimmed))
            }
            Node::Number(n) => {
                let millis = n.as_i64().or_else(|| n.as_f64().map(truncate_millis))?;
                OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
                    .ok()
                    .map(Self::Instant)
            }
            Node::Mapping(_) => {
                let seconds = node
                    .get("seconds")
                    .or_else(|| node.get("_seconds"))
                    .and_then(node_i64)?;
                let nanos = node
                    .get("nanoseconds")
                    .or_else(|| node.get("_nanoseconds"))
                    .and_then(node_i64)
                    .unwrap_or(0);
                let at = OffsetDateTime::from_unix_timestamp(seconds).ok()?;
                at.checked_add(Duration::nanoseconds(nanos)).map(Self::Instant)
            }
            Node::Null | Node::Bool(_) | Node::Sequence(_) => None,
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate_millis(value: f64) -> i64 {
    value.trunc() as i64
}

fn node_i64(node: &Node) -> Option<i64> {
    match node {
        Node::Number(n) => n.as_i64(),
        Node::Text(t) => t.trim().parse().ok(),
        _ => None,
    }
}

// =============================================================================
// RECORD
// =============================================================================

/// A stored experiment record, read-only once fetched.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub id: String,
    pub filename: Option<String>,
    pub timestamp: Option<RecordTimestamp>,
    /// The `data` field of the document; `Null` when absent.
    pub payload: Node,
}

impl Record {
    /// Build a record from decoded document fields.
    ///
    /// Field checks are best-effort: a missing or mistyped `filename` or
    /// timestamp simply leaves that attribute unknown.
    #[must_use]
    pub fn from_document(id: impl Into<String>, fields: Node) -> Self {
        let filename = fields
            .get("filename")
            .and_then(Node::as_text)
            .filter(|name| !name.trim().is_empty())
            .map(str::to_owned);

        let timestamp = fields
            .get("timestamp")
            .and_then(RecordTimestamp::from_node)
            .or_else(|| {
                fields
                    .get("metadata")
                    .and_then(|meta| meta.get("uploaded_at"))
                    .and_then(RecordTimestamp::from_node)
            });

        let payload = match fields {
            Node::Mapping(entries) => entries
                .into_iter()
                .find(|(k, _)| k == "data")
                .map_or(Node::Null, |(_, v)| v),
            _ => Node::Null,
        };

        Self { id: id.into(), filename, timestamp, payload }
    }

    /// Build a record from a plain JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::NotAnObject`] for non-object documents.
    pub fn from_json_document(id: impl Into<String>, document: &Value) -> Result<Self, DecodeError> {
        if !document.is_object() {
            return Err(DecodeError::NotAnObject);
        }
        Ok(Self::from_document(id, Node::from_json(document)))
    }

    #[must_use]
    pub fn filename_display(&self) -> &str {
        self.filename.as_deref().unwrap_or(UNKNOWN)
    }

    #[must_use]
    pub fn timestamp_display(&self) -> String {
        self.timestamp
            .as_ref()
            .map_or_else(|| UNKNOWN.to_owned(), RecordTimestamp::display)
    }

    #[must_use]
    pub fn to_wire(&self) -> RecordWire {
        RecordWire {
            id: self.id.clone(),
            filename: self.filename.clone(),
            timestamp: self.timestamp.as_ref().map(RecordTimestamp::to_wire),
            timestamp_display: self.timestamp_display(),
            payload: self.payload.to_json(),
        }
    }

    /// Rebuild a record received over the JSON API.
    #[must_use]
    pub fn from_wire(wire: RecordWire) -> Self {
        Self {
            payload: Node::from_json(&wire.payload),
            timestamp: wire.timestamp.as_deref().map(RecordTimestamp::from_wire),
            filename: wire.filename,
            id: wire.id,
        }
    }
}

/// JSON shape of a record on the viewer API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordWire {
    pub id: String,
    pub filename: Option<String>,
    pub timestamp: Option<String>,
    pub timestamp_display: String,
    pub payload: Value,
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
