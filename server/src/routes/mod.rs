//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The viewer page, the export strategies and the JSON record API share one
//! Axum router. Pages are rendered on the server; the static viewer script
//! only adds client-side toggles on top of the markup.

pub mod api;
pub mod assets;
pub mod export;
pub mod view;

use axum::Router;
use axum::http::header::ACCEPT;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tower_http::trace::TraceLayer;
use treeview::page::{self, Assets};

use crate::services::viewer::ViewerError;
use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(view::viewer))
        .route("/export/{kind}", get(export::export))
        .route("/api/records/{id}", get(api::get_record))
        .route("/assets/viewer.css", get(assets::viewer_css))
        .route("/assets/viewer.js", get(assets::viewer_js))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// HTTP status for a load failure.
pub(crate) fn viewer_error_status(err: &ViewerError) -> StatusCode {
    match err {
        ViewerError::MissingId | ViewerError::InvalidId { .. } => StatusCode::BAD_REQUEST,
        ViewerError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        ViewerError::NotFound { .. } => StatusCode::NOT_FOUND,
        ViewerError::Fetch(_) => StatusCode::BAD_GATEWAY,
    }
}

/// The client asked for JSON rather than a page (the command-line client
/// does for downloads).
pub(crate) fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.contains("application/json"))
}

/// Error panel page for a load failure. Id errors get no retry link.
pub(crate) fn viewer_error_page(err: &ViewerError, retry_href: &str) -> Response {
    let retry = match err {
        ViewerError::MissingId | ViewerError::InvalidId { .. } => None,
        _ => Some(retry_href),
    };
    let body = page::error_page(err.title(), &err.hint(), retry, None, Assets::Linked);
    (viewer_error_status(err), Html(body)).into_response()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
