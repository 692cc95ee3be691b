use super::domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationView, NewApplication,
};
use crate::accounts::UserId;
use crate::store::RepositoryError;

/// Storage abstraction for the application collection.
///
/// `decide` must apply the status conditionally — only a `pending` row may
/// be updated. A row that exists but is no longer pending yields
/// [`RepositoryError::Conflict`]; a missing row yields
/// [`RepositoryError::NotFound`]. This keeps the one-transition rule inside
/// the store instead of a racy read-then-write.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, new: NewApplication) -> Result<ApplicationRecord, RepositoryError>;
    fn fetch(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn decide(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<ApplicationRecord, RepositoryError>;
    fn for_user(&self, user: UserId) -> Result<Vec<ApplicationView>, RepositoryError>;
}
