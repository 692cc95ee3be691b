use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, info};

use super::domain::{CalculationRecord, CalculationRequest, NewCalculation, Projection};
use super::engine::ProjectionEngine;
use super::repository::ProjectionRepository;
use crate::accounts::UserId;
use crate::catalog::FranchiseRepository;
use crate::store::RepositoryError;

/// Outcome of one calculation call: the projection plus the name of the
/// franchise it was computed against.
#[derive(Debug, Clone)]
pub struct CalculationOutcome {
    pub franchise: String,
    pub result: Projection,
}

/// Orchestrates a projection run: resolves the franchise, computes the
/// projection, and appends the run to the calculation history.
pub struct ProjectionService<P, F> {
    calculations: Arc<P>,
    franchises: Arc<F>,
    engine: ProjectionEngine,
    delay: Duration,
}

impl<P, F> ProjectionService<P, F>
where
    P: ProjectionRepository + 'static,
    F: FranchiseRepository + 'static,
{
    pub fn new(calculations: Arc<P>, franchises: Arc<F>) -> Self {
        Self::with_delay(calculations, franchises, Duration::from_millis(1000))
    }

    /// The delay stands in for the heavy template-driven computation; tests
    /// pass `Duration::ZERO`.
    pub fn with_delay(calculations: Arc<P>, franchises: Arc<F>, delay: Duration) -> Self {
        Self {
            calculations,
            franchises,
            engine: ProjectionEngine::default(),
            delay,
        }
    }

    /// Run one projection. The wait is a non-blocking sleep taken before any
    /// store access, so concurrent requests are never stalled behind it.
    pub async fn calculate(
        &self,
        request: CalculationRequest,
    ) -> Result<CalculationOutcome, ProjectionError> {
        let user_id = request.user_id.ok_or(ProjectionError::MissingField("userId"))?;
        let franchise_id = request
            .franchise_id
            .ok_or(ProjectionError::MissingField("franchiseId"))?;
        let input = request.input_data.unwrap_or_default();

        let franchise = self
            .franchises
            .fetch(franchise_id)?
            .ok_or(ProjectionError::FranchiseNotFound)?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = self.engine.project(&input);
        let record = self.calculations.insert(NewCalculation {
            user_id,
            franchise_id,
            input,
            result,
        })?;

        info!(
            calculation = record.id.0,
            franchise = franchise.id.0,
            net_profit = result.net_profit,
            "projection stored"
        );

        Ok(CalculationOutcome {
            franchise: franchise.name,
            result,
        })
    }

    /// Past runs for one user, newest first.
    pub fn history(&self, user: UserId) -> Result<Vec<CalculationRecord>, ProjectionError> {
        Ok(self.calculations.for_user(user)?)
    }
}

/// Error raised by the projection service.
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("franchise not found")]
    FranchiseNotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for ProjectionError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ProjectionError::MissingField(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ProjectionError::FranchiseNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ProjectionError::Repository(_) => {
                error!(error = %self, "projection flow failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal storage error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
