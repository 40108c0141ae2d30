//! Firestore REST typed-value decoding.
//!
//! The REST API wraps every value in a single-key object naming its kind
//! (`{"stringValue": "x"}`, `{"mapValue": {"fields": {...}}}`). This module
//! unwraps those into [`Node`]s. Kinds without tree structure, and kinds this
//! decoder does not know, become [`Node::Opaque`] so the renderer can still
//! show them.

use serde_json::{Map, Number, Value};

use crate::{DecodeError, MAX_DECODE_DEPTH, Node, mapping_from_entries};

/// Decode a Firestore document body (`{"name", "fields", ...}`) into a
/// mapping of its fields. A document without `fields` is an empty mapping.
///
/// # Errors
///
/// Returns [`DecodeError::NotAnObject`] when the body is not an object and
/// [`DecodeError::Malformed`] for values that do not follow the typed-value
/// encoding.
pub fn decode_document(document: &Value) -> Result<Node, DecodeError> {
    let Some(body) = document.as_object() else {
        return Err(DecodeError::NotAnObject);
    };
    match body.get("fields") {
        None | Some(Value::Null) => Ok(Node::Mapping(Vec::new())),
        Some(Value::Object(fields)) => decode_fields(fields, "", 0),
        Some(_) => Err(malformed("fields", "expected an object")),
    }
}

/// Decode a single typed value.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] when the value is not a typed value
/// object or a known kind carries the wrong body.
pub fn decode_value(value: &Value) -> Result<Node, DecodeError> {
    decode_at(value, "$", 0)
}

fn decode_fields(fields: &Map<String, Value>, path: &str, depth: usize) -> Result<Node, DecodeError> {
    let mut entries = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        let child_path = if path.is_empty() { key.clone() } else { format!("{path}.{key}") };
        entries.push((key.clone(), decode_at(value, &child_path, depth + 1)?));
    }
    Ok(mapping_from_entries(entries))
}

fn decode_at(value: &Value, path: &str, depth: usize) -> Result<Node, DecodeError> {
    if depth > MAX_DECODE_DEPTH {
        return Ok(Node::truncated());
    }

    let Some(typed) = value.as_object() else {
        return Err(malformed(path, "expected a typed value object"));
    };
    let Some((kind, inner)) = typed.iter().next() else {
        return Err(malformed(path, "empty typed value"));
    };

    match kind.as_str() {
        "nullValue" => Ok(Node::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Node::Bool)
            .ok_or_else(|| malformed(path, "booleanValue is not a bool")),
        // 64-bit integers travel as strings.
        "integerValue" => match inner {
            Value::String(raw) => raw
                .parse::<i64>()
                .map(|n| Node::Number(Number::from(n)))
                .map_err(|e| malformed(path, &format!("integerValue: {e}"))),
            Value::Number(n) => Ok(Node::Number(n.clone())),
            _ => Err(malformed(path, "integerValue is not a number")),
        },
        "doubleValue" => match inner {
            Value::Number(n) => Ok(Node::Number(n.clone())),
            // NaN and the infinities have no JSON number form.
            Value::String(raw) => Ok(Node::Opaque { kind: "double".into(), text: raw.clone() }),
            _ => Err(malformed(path, "doubleValue is not a number")),
        },
        "stringValue" => inner
            .as_str()
            .map(|s| Node::Text(s.to_owned()))
            .ok_or_else(|| malformed(path, "stringValue is not a string")),
        "timestampValue" | "referenceValue" | "bytesValue" => {
            let Some(text) = inner.as_str() else {
                return Err(malformed(path, &format!("{kind} is not a string")));
            };
            Ok(Node::Opaque { kind: opaque_kind(kind).into(), text: text.to_owned() })
        }
        "geoPointValue" => {
            let lat = inner.get("latitude").and_then(Value::as_f64);
            let lng = inner.get("longitude").and_then(Value::as_f64);
            let text = match (lat, lng) {
                (Some(lat), Some(lng)) => format!("{lat}, {lng}"),
                _ => inner.to_string(),
            };
            Ok(Node::Opaque { kind: "geopoint".into(), text })
        }
        "arrayValue" => match inner.get("values") {
            None | Some(Value::Null) => Ok(Node::Sequence(Vec::new())),
            Some(Value::Array(values)) => values
                .iter()
                .enumerate()
                .map(|(i, v)| decode_at(v, &format!("{path}[{i}]"), depth + 1))
                .collect::<Result<Vec<_>, _>>()
                .map(Node::Sequence),
            Some(_) => Err(malformed(path, "arrayValue.values is not an array")),
        },
        "mapValue" => match inner.get("fields") {
            None | Some(Value::Null) => Ok(Node::Mapping(Vec::new())),
            Some(Value::Object(fields)) => decode_fields(fields, path, depth),
            Some(_) => Err(malformed(path, "mapValue.fields is not an object")),
        },
        other => Ok(Node::Opaque { kind: other.to_owned(), text: inner.to_string() }),
    }
}

fn opaque_kind(kind: &str) -> &'static str {
    match kind {
        "timestampValue" => "timestamp",
        "referenceValue" => "reference",
        _ => "bytes",
    }
}

fn malformed(path: &str, reason: &str) -> DecodeError {
    DecodeError::Malformed { path: path.to_owned(), reason: reason.to_owned() }
}

#[cfg(test)]
#[path = "firestore_test.rs"]
mod tests;
