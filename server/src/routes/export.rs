//! Export routes: one handler per strategy of the export menu.
//!
//! Each strategy is reached only through its own link. A failing strategy
//! answers with its own error panel and never falls through to another.

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Json, Response};
use records::Record;
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{error, info};
use treeview::export::{self, ExportArtifact, ExportKind};
use treeview::page::{self, Assets};

use super::{viewer_error_page, viewer_error_status, wants_json};
use crate::error::{ErrorBody, ErrorCode};
use crate::services::viewer;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub id: Option<String>,
}

/// `GET /export/{print|document|clipboard|text}?id=<id>`
///
/// Failures answer with an HTML panel, or with an [`ErrorBody`] when the
/// client accepts JSON.
pub async fn export(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<ExportQuery>,
) -> Response {
    let Some(kind) = ExportKind::parse(&kind) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let json = wants_json(&headers);
    let record = match viewer::load_record(state.store.as_ref(), &state.retry, query.id.as_deref()).await {
        Ok(record) => record,
        Err(e) if json => return (viewer_error_status(&e), Json(ErrorBody::from_error(&e))).into_response(),
        Err(e) => return viewer_error_page(&e, &uri.to_string()),
    };

    let artifact = export::prepare(kind, &record, OffsetDateTime::now_utc().date());
    info!(record_id = %record.id, kind = kind.as_str(), "export requested");

    match kind {
        ExportKind::Print => Html(artifact.body).into_response(),
        ExportKind::Clipboard => Html(page::clipboard_page(&record, Assets::Linked)).into_response(),
        ExportKind::Text => attachment(artifact.content_type, artifact.filename.as_deref(), artifact.body.into_bytes()),
        ExportKind::Document => document(&state, &record, artifact, &uri, json).await,
    }
}

async fn document(state: &AppState, record: &Record, artifact: ExportArtifact, uri: &Uri, json: bool) -> Response {
    match state.documents.generate(&artifact.body).await {
        Ok(bytes) => attachment("application/pdf", artifact.filename.as_deref(), bytes),
        Err(e) => {
            error!(record_id = %record.id, error = %e, code = e.error_code(), "document generation failed");
            if json {
                return (StatusCode::SERVICE_UNAVAILABLE, Json(ErrorBody::from_error(&e))).into_response();
            }
            let text_href = page::export_href(ExportKind::Text, &record.id);
            let body = page::error_page(
                "PDF generation unavailable",
                &format!("{e}. The text export is still available."),
                Some(&uri.to_string()),
                Some((&text_href, ExportKind::Text.label())),
                Assets::Linked,
            );
            (StatusCode::SERVICE_UNAVAILABLE, Html(body)).into_response()
        }
    }
}

pub(crate) fn attachment(content_type: &str, filename: Option<&str>, body: Vec<u8>) -> Response {
    let disposition = filename.map_or_else(
        || "attachment".to_string(),
        |name| format!("attachment; filename=\"{}\"", header_safe(name)),
    );
    ([(CONTENT_TYPE, content_type.to_string()), (CONTENT_DISPOSITION, disposition)], body).into_response()
}

/// Header-safe file name: ASCII letters, digits, `-`, `_` and `.` only.
fn header_safe(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect()
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
