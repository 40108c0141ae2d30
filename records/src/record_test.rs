use super::*;
use serde_json::json;

fn record_from(value: &Value) -> Record {
    Record::from_json_document("abc123456789", value).expect("record should decode")
}

#[test]
fn from_document_extracts_metadata_and_payload() {
    let record = record_from(&json!({
        "filename": "setup.json",
        "timestamp": "2024-03-05T10:20:30Z",
        "data": {"temperature": 21}
    }));

    assert_eq!(record.id, "abc123456789");
    assert_eq!(record.filename_display(), "setup.json");
    assert_eq!(record.timestamp_display(), "2024-03-05 10:20:30 UTC");
    assert_eq!(record.payload.get("temperature").map(Node::kind_name), Some("number"));
}

#[test]
fn missing_fields_fall_back_to_unknown_and_null() {
    let record = record_from(&json!({}));
    assert_eq!(record.filename_display(), "Unknown");
    assert_eq!(record.timestamp_display(), "Unknown");
    assert_eq!(record.payload, Node::Null);
}

#[test]
fn blank_filename_is_treated_as_missing() {
    let record = record_from(&json!({"filename": "   "}));
    assert!(record.filename.is_none());
}

#[test]
fn non_string_filename_is_ignored() {
    let record = record_from(&json!({"filename": 42}));
    assert!(record.filename.is_none());
}

#[test]
fn timestamp_falls_back_to_metadata_uploaded_at() {
    let record = record_from(&json!({"metadata": {"uploaded_at": "2023-12-31T23:59:59Z"}}));
    assert_eq!(record.timestamp_display(), "2023-12-31 23:59:59 UTC");
}

#[test]
fn epoch_millis_timestamp_is_an_instant() {
    let record = record_from(&json!({"timestamp": 86_400_000}));
    assert_eq!(record.timestamp_display(), "1970-01-02 00:00:00 UTC");
}

#[test]
fn seconds_mapping_timestamp_is_an_instant() {
    let record = record_from(&json!({"timestamp": {"_seconds": 60, "_nanoseconds": 0}}));
    assert_eq!(record.timestamp_display(), "1970-01-01 00:01:00 UTC");

    let record = record_from(&json!({"timestamp": {"seconds": "120", "nanoseconds": 5}}));
    assert_eq!(record.timestamp_display(), "1970-01-01 00:02:00 UTC");
}

#[test]
fn unparseable_timestamp_text_is_kept_raw() {
    let record = record_from(&json!({"timestamp": "last tuesday"}));
    assert_eq!(record.timestamp, Some(RecordTimestamp::Raw("last tuesday".into())));
    assert_eq!(record.timestamp_display(), "last tuesday");
}

#[test]
fn offset_timestamps_display_in_utc() {
    let record = record_from(&json!({"timestamp": "2024-03-05T12:00:00+02:00"}));
    assert_eq!(record.timestamp_display(), "2024-03-05 10:00:00 UTC");
}

#[test]
fn non_object_document_is_rejected() {
    let err = Record::from_json_document("x", &json!([1, 2])).expect_err("should fail");
    assert!(matches!(err, DecodeError::NotAnObject));
}

#[test]
fn wire_round_trip_keeps_record() {
    let record = record_from(&json!({
        "filename": "f.json",
        "timestamp": "2024-03-05T10:20:30Z",
        "data": {"list": [1, "two", null]}
    }));
    let wire = record.to_wire();
    assert_eq!(wire.timestamp.as_deref(), Some("2024-03-05T10:20:30Z"));
    assert_eq!(wire.timestamp_display, "2024-03-05 10:20:30 UTC");

    let json = serde_json::to_string(&wire).expect("serialize");
    let restored: RecordWire = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(Record::from_wire(restored), record);
}
