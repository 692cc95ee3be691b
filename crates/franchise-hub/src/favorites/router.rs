use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::error;

use super::domain::{FavoriteRequest, FavoriteView, NewFavorite};
use super::repository::FavoriteRepository;
use crate::accounts::UserId;
use crate::catalog::FranchiseId;
use crate::store::RepositoryError;

/// Router builder exposing the bookmark surface.
pub fn favorite_router<R>(favorites: Arc<R>) -> Router
where
    R: FavoriteRepository + 'static,
{
    Router::new()
        .route("/api/favorites", post(add_handler::<R>))
        .route("/api/users/:user_id/favorites", get(list_handler::<R>))
        .route(
            "/api/users/:user_id/favorites/:franchise_id",
            delete(remove_handler::<R>),
        )
        .with_state(favorites)
}

/// Wire-level failures for the bookmark endpoints.
#[derive(Debug, thiserror::Error)]
pub enum FavoriteError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("franchise is already in favorites")]
    AlreadyFavorite,
    #[error("favorite not found")]
    NotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for FavoriteError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            FavoriteError::MissingField(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            FavoriteError::AlreadyFavorite => (StatusCode::CONFLICT, self.to_string()),
            FavoriteError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            FavoriteError::Repository(_) => {
                error!(error = %self, "favorite operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal storage error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub(crate) async fn add_handler<R>(
    State(favorites): State<Arc<R>>,
    Json(request): Json<FavoriteRequest>,
) -> Result<Json<Value>, FavoriteError>
where
    R: FavoriteRepository + 'static,
{
    let user_id = request.user_id.ok_or(FavoriteError::MissingField("userId"))?;
    let franchise_id = request
        .franchise_id
        .ok_or(FavoriteError::MissingField("franchiseId"))?;

    match favorites.insert(NewFavorite {
        user_id,
        franchise_id,
    }) {
        Ok(favorite) => Ok(Json(json!({
            "message": "franchise added to favorites",
            "favoriteId": favorite.id,
        }))),
        Err(RepositoryError::Conflict) => Err(FavoriteError::AlreadyFavorite),
        Err(other) => Err(other.into()),
    }
}

pub(crate) async fn list_handler<R>(
    State(favorites): State<Arc<R>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<FavoriteView>>, FavoriteError>
where
    R: FavoriteRepository + 'static,
{
    Ok(Json(favorites.for_user(UserId(user_id))?))
}

pub(crate) async fn remove_handler<R>(
    State(favorites): State<Arc<R>>,
    Path((user_id, franchise_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, FavoriteError>
where
    R: FavoriteRepository + 'static,
{
    match favorites.remove(UserId(user_id), FranchiseId(franchise_id)) {
        Ok(()) => Ok(Json(json!({ "message": "franchise removed from favorites" }))),
        Err(RepositoryError::NotFound) => Err(FavoriteError::NotFound),
        Err(other) => Err(other.into()),
    }
}
