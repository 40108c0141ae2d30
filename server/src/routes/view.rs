//! Viewer page route.

use axum::extract::{Query, State};
use axum::http::Uri;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use treeview::page::{self, Assets, PageOptions};

use super::viewer_error_page;
use crate::services::viewer;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub id: Option<String>,
    /// `all` starts with every branch collapsed.
    pub collapsed: Option<String>,
}

impl ViewQuery {
    fn start_collapsed(&self) -> bool {
        self.collapsed.as_deref().is_some_and(|v| v.eq_ignore_ascii_case("all"))
    }
}

/// `GET /?id=<id>[&collapsed=all]`
pub async fn viewer(State(state): State<AppState>, uri: Uri, Query(query): Query<ViewQuery>) -> Response {
    match viewer::load_record(state.store.as_ref(), &state.retry, query.id.as_deref()).await {
        Ok(record) => {
            let options = PageOptions { assets: Assets::Linked, exports: true, collapsed: query.start_collapsed() };
            Html(page::viewer_page(&record, options)).into_response()
        }
        Err(e) => viewer_error_page(&e, &uri.to_string()),
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
