use axum::body::to_bytes;
use axum::http::StatusCode;

use super::*;
use crate::services::document::DocumentError;
use crate::state::test_helpers::{sample_record, test_app_state, test_app_state_with};
use crate::store::mock::MockStore;

async fn call(state: AppState, kind: &str, id: Option<&str>) -> Response {
    call_with(state, kind, id, HeaderMap::new()).await
}

async fn call_with(state: AppState, kind: &str, id: Option<&str>, headers: HeaderMap) -> Response {
    let query = ExportQuery { id: id.map(str::to_owned) };
    export(State(state), Path(kind.to_string()), Uri::from_static("/export/x?id=abc12345678"), headers, Query(query)).await
}

fn accept_json() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(axum::http::header::ACCEPT, "application/pdf, application/json;q=0.9".parse().unwrap());
    headers
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn header<'a>(response: &'a Response, name: axum::http::HeaderName) -> &'a str {
    response.headers().get(name).and_then(|v| v.to_str().ok()).unwrap_or_default()
}

#[tokio::test]
async fn text_export_is_an_attachment() {
    let state = test_app_state(vec![sample_record("abc12345678")]);
    let response = call(state, "text", Some("abc12345678")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(header(&response, CONTENT_TYPE).starts_with("text/plain"));
    let disposition = header(&response, CONTENT_DISPOSITION).to_string();
    assert!(disposition.starts_with("attachment; filename=\"experiment_abc12345_"));
    assert!(disposition.ends_with(".txt\""));
    let body = body_text(response).await;
    assert!(body.starts_with("EXPERIMENTAL SETUP DATA\n"));
    assert!(body.contains("ID: abc12345678\n"));
}

#[tokio::test]
async fn print_export_is_printable_page() {
    let state = test_app_state(vec![sample_record("abc")]);
    let response = call(state, "print", Some("abc")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("<h1>Experimental Setup Data</h1>"));
    assert!(body.contains("data-print"));
}

#[tokio::test]
async fn clipboard_export_holds_plain_text() {
    let state = test_app_state(vec![sample_record("abc")]);
    let body = body_text(call(state, "clipboard", Some("abc")).await).await;
    assert!(body.contains("<textarea"));
    assert!(body.contains("EXPERIMENTAL SETUP DATA"));
    assert!(body.contains("data-copy-target"));
}

#[tokio::test]
async fn document_export_returns_pdf() {
    let state = test_app_state(vec![sample_record("abc")]);
    let response = call(state, "document", Some("abc")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, CONTENT_TYPE), "application/pdf");
    assert!(header(&response, CONTENT_DISPOSITION).ends_with(".pdf\""));
    assert_eq!(body_text(response).await, "%PDF-1.4 test");
}

#[tokio::test]
async fn document_failure_offers_text_export() {
    let state = test_app_state_with(
        MockStore::with_records([sample_record("abc")]),
        Err(DocumentError::ToolNotFound("wkhtmltopdf".into())),
    );
    let response = call(state, "document", Some("abc")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_text(response).await;
    assert!(body.contains("PDF generation unavailable"));
    assert!(body.contains(r#"href="/export/text?id=abc""#));
    assert!(body.contains("Download Text"));
}

#[tokio::test]
async fn document_failure_answers_json_when_accepted() {
    let state = test_app_state_with(
        MockStore::with_records([sample_record("abc")]),
        Err(DocumentError::ToolNotFound("wkhtmltopdf".into())),
    );
    let response = call_with(state, "document", Some("abc"), accept_json()).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(header(&response, CONTENT_TYPE).starts_with("application/json"));
    let body: ErrorBody = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body.code, "E_DOCUMENT_TOOL_NOT_FOUND");
    assert!(body.message.contains("wkhtmltopdf"));
}

#[tokio::test]
async fn load_failure_answers_json_when_accepted() {
    let state = test_app_state(vec![]);
    let response = call_with(state, "document", Some("zzz"), accept_json()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body.code, "E_NOT_FOUND");
}

#[tokio::test]
async fn unknown_strategy_is_not_found() {
    let state = test_app_state(vec![sample_record("abc")]);
    assert_eq!(call(state, "fax", Some("abc")).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn export_without_id_is_bad_request() {
    let state = test_app_state(vec![]);
    assert_eq!(call(state, "text", None).await.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn attachment_names_are_header_safe() {
    let response = attachment("text/plain", Some("experiment_a\"b é_2024-01-02.txt"), Vec::new());
    assert_eq!(
        header(&response, CONTENT_DISPOSITION),
        "attachment; filename=\"experiment_a_b___2024-01-02.txt\""
    );
}
