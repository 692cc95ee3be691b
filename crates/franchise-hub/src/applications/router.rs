use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::domain::{ApplicationId, ApplicationView, ModerationRequest, SubmissionRequest};
use super::repository::ApplicationRepository;
use super::service::{ApplicationError, ApplicationService};
use crate::accounts::UserId;

/// Router builder exposing intake, the applicant's listing, and moderation.
pub fn application_router<R>(service: Arc<ApplicationService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/applications", post(submit_handler::<R>))
        .route(
            "/api/users/:user_id/applications",
            get(list_handler::<R>),
        )
        .route(
            "/api/applications/:application_id",
            patch(moderate_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    Json(request): Json<SubmissionRequest>,
) -> Result<Json<Value>, ApplicationError>
where
    R: ApplicationRepository + 'static,
{
    let record = service.submit(request)?;
    Ok(Json(json!({
        "message": "application submitted",
        "applicationId": record.id,
    })))
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<ApplicationView>>, ApplicationError>
where
    R: ApplicationRepository + 'static,
{
    Ok(Json(service.list_for_user(UserId(user_id))?))
}

pub(crate) async fn moderate_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    Path(application_id): Path<i64>,
    Json(request): Json<ModerationRequest>,
) -> Result<Json<Value>, ApplicationError>
where
    R: ApplicationRepository + 'static,
{
    let raw_status = request.status.unwrap_or_default();
    let record = service.moderate(ApplicationId(application_id), &raw_status)?;
    Ok(Json(json!({
        "message": format!("application {}", record.status.label()),
    })))
}
