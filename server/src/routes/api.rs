//! JSON record API used by the command-line client.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Json, Response};

use super::viewer_error_status;
use crate::error::ErrorBody;
use crate::services::viewer;
use crate::state::AppState;

/// `GET /api/records/{id}`
pub async fn get_record(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match viewer::load_record(state.store.as_ref(), &state.retry, Some(&id)).await {
        Ok(record) => Json(record.to_wire()).into_response(),
        Err(e) => (viewer_error_status(&e), Json(ErrorBody::from_error(&e))).into_response(),
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
