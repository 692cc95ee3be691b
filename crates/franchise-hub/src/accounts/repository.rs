use super::domain::{NewUser, StoredCredentials, User};
use crate::store::RepositoryError;

/// Storage abstraction for the user collection.
///
/// `insert` must enforce email uniqueness atomically — implementations map a
/// uniqueness violation to [`RepositoryError::Conflict`] rather than
/// pre-checking with a separate read.
pub trait UserRepository: Send + Sync {
    fn insert(&self, new: NewUser) -> Result<User, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<StoredCredentials>, RepositoryError>;
}
