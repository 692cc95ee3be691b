use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::domain::{CalculationRecord, CalculationRequest};
use super::repository::ProjectionRepository;
use super::service::{ProjectionError, ProjectionService};
use crate::accounts::UserId;
use crate::catalog::FranchiseRepository;

/// Router builder exposing the calculator and the per-user history.
pub fn projection_router<P, F>(service: Arc<ProjectionService<P, F>>) -> Router
where
    P: ProjectionRepository + 'static,
    F: FranchiseRepository + 'static,
{
    Router::new()
        .route("/api/calculate", post(calculate_handler::<P, F>))
        .route(
            "/api/users/:user_id/calculations",
            get(history_handler::<P, F>),
        )
        .with_state(service)
}

pub(crate) async fn calculate_handler<P, F>(
    State(service): State<Arc<ProjectionService<P, F>>>,
    Json(request): Json<CalculationRequest>,
) -> Result<Json<Value>, ProjectionError>
where
    P: ProjectionRepository + 'static,
    F: FranchiseRepository + 'static,
{
    let outcome = service.calculate(request).await?;
    Ok(Json(json!({
        "success": true,
        "result": outcome.result,
        "franchise": outcome.franchise,
    })))
}

pub(crate) async fn history_handler<P, F>(
    State(service): State<Arc<ProjectionService<P, F>>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<CalculationRecord>>, ProjectionError>
where
    P: ProjectionRepository + 'static,
    F: FranchiseRepository + 'static,
{
    Ok(Json(service.history(UserId(user_id))?))
}
