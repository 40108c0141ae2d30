use super::*;

fn client(base: &str) -> ViewerClient {
    ViewerClient::new(base).unwrap()
}

#[test]
fn record_url_joins_api_path() {
    let c = client("http://127.0.0.1:3000");
    assert_eq!(c.record_url("abc").as_str(), "http://127.0.0.1:3000/api/records/abc");
}

#[test]
fn record_url_keeps_base_prefix_and_escapes_id() {
    let c = client("https://lab.test/viewer/");
    assert_eq!(c.record_url("a b/c").as_str(), "https://lab.test/viewer/api/records/a%20b%2Fc");
}

#[test]
fn export_url_carries_id_query() {
    let c = client("http://localhost:3000/");
    assert_eq!(
        c.export_url(ExportKind::Document, "x&y").as_str(),
        "http://localhost:3000/export/document?id=x%26y"
    );
}

#[test]
fn base_url_must_be_http() {
    assert!(matches!(parse_base_url("ftp://host"), Err(CliError::InvalidBaseUrl(_))));
    assert!(matches!(parse_base_url("not a url"), Err(CliError::InvalidBaseUrl(_))));
    assert!(parse_base_url(" http://host:1 ").is_ok());
}

#[test]
fn parses_record_wire() {
    let text = r#"{"id":"abc","filename":"f.json","timestamp":"2024-03-05T14:07:09Z","timestamp_display":"2024-03-05 14:07:09 UTC","payload":{"k":[1,2]}}"#;
    let record = parse_record(text).unwrap();
    assert_eq!(record.id, "abc");
    assert_eq!(record.filename_display(), "f.json");
    assert_eq!(record.timestamp_display(), "2024-03-05 14:07:09 UTC");
    assert!(record.payload.get("k").is_some());
}

#[test]
fn malformed_record_is_json_error() {
    assert!(matches!(parse_record("{"), Err(CliError::Json(_))));
}

#[test]
fn server_error_reads_error_body() {
    let err = server_error(
        StatusCode::NOT_FOUND,
        r#"{"code":"E_NOT_FOUND","message":"Experiment not found: abc","retryable":false}"#,
    );
    match err {
        CliError::Server { status, code, message, retryable } => {
            assert_eq!(status, 404);
            assert_eq!(code, "E_NOT_FOUND");
            assert_eq!(message, "Experiment not found: abc");
            assert!(!retryable);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn server_error_falls_back_to_body_text() {
    let err = server_error(StatusCode::BAD_GATEWAY, "  upstream down\n");
    match err {
        CliError::Server { status, code, message, retryable } => {
            assert_eq!(status, 502);
            assert_eq!(code, "E_HTTP");
            assert_eq!(message, "upstream down");
            assert!(retryable);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn document_error_carries_server_detail() {
    let err = document_error(
        StatusCode::SERVICE_UNAVAILABLE,
        r#"{"code":"E_DOCUMENT_TOOL_NOT_FOUND","message":"document generator not found: wkhtmltopdf","retryable":false}"#,
    );
    match err {
        CliError::Document(detail) => {
            assert_eq!(detail, "document generator not found: wkhtmltopdf (E_DOCUMENT_TOOL_NOT_FOUND)");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn document_load_failure_is_server_error() {
    let err = document_error(
        StatusCode::NOT_FOUND,
        r#"{"code":"E_NOT_FOUND","message":"Experiment not found: abc","retryable":false}"#,
    );
    assert!(matches!(err, CliError::Server { status: 404, ref code, .. } if code == "E_NOT_FOUND"));
}

#[test]
fn document_error_without_body_names_status() {
    match document_error(StatusCode::BAD_GATEWAY, "<html></html>") {
        CliError::Document(detail) => assert_eq!(detail, "server answered HTTP 502"),
        other => panic!("unexpected error: {other:?}"),
    }
    match document_error(StatusCode::OK, "<html></html>") {
        CliError::Document(detail) => assert_eq!(detail, "server did not answer with a PDF"),
        other => panic!("unexpected error: {other:?}"),
    }
}
