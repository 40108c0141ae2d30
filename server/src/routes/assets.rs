//! Static viewer assets.

use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::IntoResponse;
use treeview::assets::{VIEWER_CSS, VIEWER_JS};

const CACHE: &str = "public, max-age=3600";

pub async fn viewer_css() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/css; charset=utf-8"), (CACHE_CONTROL, CACHE)], VIEWER_CSS)
}

pub async fn viewer_js() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/javascript; charset=utf-8"), (CACHE_CONTROL, CACHE)], VIEWER_JS)
}
