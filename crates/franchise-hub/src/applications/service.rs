use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, info};

use super::domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationView, ModerationDecision,
    NewApplication, SubmissionRequest,
};
use super::repository::ApplicationRepository;
use crate::accounts::UserId;
use crate::store::RepositoryError;

/// Intake and moderation over the application repository.
pub struct ApplicationService<R> {
    applications: Arc<R>,
}

impl<R> ApplicationService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(applications: Arc<R>) -> Self {
        Self { applications }
    }

    /// File a new application. Every submission starts out `pending`; a user
    /// may apply to the same franchise any number of times.
    pub fn submit(&self, request: SubmissionRequest) -> Result<ApplicationRecord, ApplicationError> {
        let user_id = request
            .user_id
            .ok_or(ApplicationError::MissingField("userId"))?;
        let franchise_id = request
            .franchise_id
            .ok_or(ApplicationError::MissingField("franchiseId"))?;
        let message = request
            .message
            .filter(|message| !message.trim().is_empty());

        let record = self.applications.insert(NewApplication {
            user_id,
            franchise_id,
            message,
        })?;
        info!(application = record.id.0, user = user_id.0, "application submitted");
        Ok(record)
    }

    /// The applicant's view of their submissions, joined with the franchise
    /// name.
    pub fn list_for_user(&self, user: UserId) -> Result<Vec<ApplicationView>, ApplicationError> {
        Ok(self.applications.for_user(user)?)
    }

    /// Apply a moderation decision. Exactly one transition per application:
    /// a second decision is rejected, whatever it is.
    pub fn moderate(
        &self,
        id: ApplicationId,
        raw_status: &str,
    ) -> Result<ApplicationRecord, ApplicationError> {
        let decision = ModerationDecision::parse(raw_status)
            .ok_or_else(|| ApplicationError::InvalidStatus(raw_status.to_string()))?;

        match self.applications.decide(id, decision.status()) {
            Ok(record) => {
                info!(
                    application = id.0,
                    status = record.status.label(),
                    "application moderated"
                );
                Ok(record)
            }
            Err(RepositoryError::NotFound) => Err(ApplicationError::NotFound),
            Err(RepositoryError::Conflict) => match self.applications.fetch(id)? {
                Some(existing) => Err(ApplicationError::AlreadyDecided(existing.status)),
                None => Err(ApplicationError::NotFound),
            },
            Err(other) => Err(other.into()),
        }
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("unsupported status '{0}', expected 'approved' or 'rejected'")]
    InvalidStatus(String),
    #[error("application not found")]
    NotFound,
    #[error("application is already {}", .0.label())]
    AlreadyDecided(ApplicationStatus),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApplicationError::MissingField(_) | ApplicationError::InvalidStatus(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApplicationError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApplicationError::AlreadyDecided(_) => (StatusCode::CONFLICT, self.to_string()),
            ApplicationError::Repository(_) => {
                error!(error = %self, "application operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal storage error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
