use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::repository::FranchiseRepository;

/// Router builder exposing the public franchise listing.
pub fn catalog_router<F>(franchises: Arc<F>) -> Router
where
    F: FranchiseRepository + 'static,
{
    Router::new()
        .route("/api/franchises", get(list_handler::<F>))
        .with_state(franchises)
}

pub(crate) async fn list_handler<F>(State(franchises): State<Arc<F>>) -> Response
where
    F: FranchiseRepository + 'static,
{
    match franchises.list() {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(err) => {
            error!(error = %err, "franchise listing failed");
            let payload = json!({ "error": "internal storage error" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
