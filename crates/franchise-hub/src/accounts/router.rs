use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};

use super::domain::{LoginRequest, RegistrationRequest};
use super::repository::UserRepository;
use super::service::{AccountError, AccountService};

/// Router builder exposing the registration and login endpoints.
pub fn account_router<R>(service: Arc<AccountService<R>>) -> Router
where
    R: UserRepository + 'static,
{
    Router::new()
        .route("/api/register", post(register_handler::<R>))
        .route("/api/login", post(login_handler::<R>))
        .with_state(service)
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
    Json(request): Json<RegistrationRequest>,
) -> Result<Json<Value>, AccountError>
where
    R: UserRepository + 'static,
{
    let user = service.register(request)?;
    Ok(Json(json!({
        "message": "registration successful",
        "user": user,
    })))
}

pub(crate) async fn login_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AccountError>
where
    R: UserRepository + 'static,
{
    let user = service.authenticate(request)?;
    Ok(Json(json!({
        "message": "login successful",
        "user": user,
    })))
}
