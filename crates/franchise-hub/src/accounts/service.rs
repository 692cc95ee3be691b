use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, info};

use super::domain::{LoginRequest, NewUser, RegistrationRequest, Role, User};
use super::password::{hash_password, verify_password, CredentialError};
use super::repository::UserRepository;
use crate::store::RepositoryError;

/// Registration and authentication against the user repository.
pub struct AccountService<R> {
    users: Arc<R>,
}

impl<R> AccountService<R>
where
    R: UserRepository + 'static,
{
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }

    /// Create an account with the default `user` role. The password is
    /// hashed before the repository ever sees it.
    pub fn register(&self, request: RegistrationRequest) -> Result<User, AccountError> {
        let email = required(request.email, "email")?;
        let password = required(request.password, "password")?;
        let name = required(request.name, "name")?;

        let password_hash = hash_password(&password)?;
        match self.users.insert(NewUser {
            email,
            password_hash,
            name,
            role: Role::User,
        }) {
            Ok(user) => {
                info!(user = user.id.0, "account registered");
                Ok(user)
            }
            Err(RepositoryError::Conflict) => Err(AccountError::DuplicateEmail),
            Err(other) => Err(other.into()),
        }
    }

    /// Verify a claimed identity. An unknown email and a wrong password are
    /// indistinguishable to the caller.
    pub fn authenticate(&self, request: LoginRequest) -> Result<User, AccountError> {
        let email = required(request.email, "email")?;
        let password = required(request.password, "password")?;

        let Some(stored) = self.users.find_by_email(&email)? else {
            return Err(AccountError::InvalidCredentials);
        };

        if verify_password(&password, &stored.password_hash)? {
            info!(user = stored.user.id.0, "login succeeded");
            Ok(stored.user)
        } else {
            Err(AccountError::InvalidCredentials)
        }
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, AccountError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => Ok(raw.trim().to_string()),
        _ => Err(AccountError::MissingField(field)),
    }
}

/// Error raised by the account service.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("an account with this email already exists")]
    DuplicateEmail,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AccountError::MissingField(_) | AccountError::DuplicateEmail => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AccountError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            AccountError::Credential(_) | AccountError::Repository(_) => {
                error!(error = %self, "account operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal storage error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
