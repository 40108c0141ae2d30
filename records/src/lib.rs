//! Shared record model and payload decoding for the experiment viewer.
//!
//! This crate owns the data representation used by both `server` and `cli`.
//! Payloads arrive as loosely-typed documents (plain JSON or Firestore typed
//! values) and are decoded once into the closed [`Node`] type so renderers can
//! match exhaustively instead of inspecting runtime kinds.

pub mod firestore;
mod record;

pub use record::{Record, RecordTimestamp, RecordWire};

use serde_json::{Map, Number, Value};

/// Maximum payload nesting rendered as a tree.
pub const MAX_DEPTH: usize = 64;

/// Nesting kept by the decoders. Anything deeper is replaced by
/// [`Node::truncated`] instead of failing the whole document.
pub const MAX_DECODE_DEPTH: usize = 2 * MAX_DEPTH;

/// Error returned by the payload decoders.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The top-level document was not a JSON object.
    #[error("document is not an object")]
    NotAnObject,
    /// A Firestore typed value had no recognized kind or a malformed body.
    #[error("malformed store value at `{path}`: {reason}")]
    Malformed { path: String, reason: String },
    /// The raw bytes were not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A position in a record payload.
///
/// Mapping entries keep document order; keys are unique within a mapping.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Sequence(Vec<Node>),
    Mapping(Vec<(String, Node)>),
    /// A store value with no structural meaning in the tree (timestamp,
    /// geo point, reference, bytes, kinds the decoder does not know, cut-off
    /// nesting). `text` is its display form.
    Opaque { kind: String, text: String },
}

impl Node {
    /// Decode a plain JSON value. Values nested past [`MAX_DECODE_DEPTH`]
    /// become [`Node::truncated`].
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        decode_json(value, 0)
    }

    /// Marker standing in for a value nested past [`MAX_DECODE_DEPTH`].
    #[must_use]
    pub fn truncated() -> Self {
        Self::Opaque { kind: "truncated".to_owned(), text: "(nesting too deep)".to_owned() }
    }

    /// Convert back to plain JSON. Opaque values become their display text.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(v) => Value::Bool(*v),
            Self::Number(v) => Value::Number(v.clone()),
            Self::Text(v) => Value::String(v.clone()),
            Self::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<_, _>>(),
            ),
            Self::Opaque { text, .. } => Value::String(text.clone()),
        }
    }

    /// Short kind name, used for markup tags.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::Sequence(_) => "array",
            Self::Mapping(_) => "object",
            Self::Opaque { .. } => "unknown",
        }
    }

    /// Look up a mapping entry by key. `None` for non-mappings.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Pretty-printed JSON with two-space indentation.
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.to_json()).unwrap_or_else(|_| "null".to_owned())
    }
}

/// Build a mapping from entries, keeping the first position of a repeated key
/// and the last value written to it.
pub(crate) fn mapping_from_entries(entries: impl IntoIterator<Item = (String, Node)>) -> Node {
    let mut out: Vec<(String, Node)> = Vec::new();
    for (key, value) in entries {
        if let Some(slot) = out.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            out.push((key, value));
        }
    }
    Node::Mapping(out)
}

fn decode_json(value: &Value, depth: usize) -> Node {
    if depth > MAX_DECODE_DEPTH {
        return Node::truncated();
    }

    match value {
        Value::Null => Node::Null,
        Value::Bool(v) => Node::Bool(*v),
        Value::Number(v) => Node::Number(v.clone()),
        Value::String(v) => Node::Text(v.clone()),
        Value::Array(items) => Node::Sequence(items.iter().map(|item| decode_json(item, depth + 1)).collect()),
        Value::Object(map) => mapping_from_entries(map.iter().map(|(k, v)| (k.clone(), decode_json(v, depth + 1)))),
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
