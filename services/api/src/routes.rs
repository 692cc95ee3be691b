use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use franchise_hub::accounts::{account_router, AccountService, UserRepository};
use franchise_hub::applications::{application_router, ApplicationRepository, ApplicationService};
use franchise_hub::catalog::{catalog_router, FranchiseRepository};
use franchise_hub::favorites::{favorite_router, FavoriteRepository};
use franchise_hub::projections::{projection_router, ProjectionRepository, ProjectionService};

/// Compose the business routers with the operational endpoints.
pub(crate) fn api_routes<U, F, P, A, V>(
    accounts: Arc<AccountService<U>>,
    franchises: Arc<F>,
    projections: Arc<ProjectionService<P, F>>,
    applications: Arc<ApplicationService<A>>,
    favorites: Arc<V>,
) -> axum::Router
where
    U: UserRepository + 'static,
    F: FranchiseRepository + 'static,
    P: ProjectionRepository + 'static,
    A: ApplicationRepository + 'static,
    V: FavoriteRepository + 'static,
{
    account_router(accounts)
        .merge(catalog_router(franchises))
        .merge(projection_router(projections))
        .merge(application_router(applications))
        .merge(favorite_router(favorites))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
