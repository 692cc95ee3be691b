use super::domain::{Franchise, FranchiseId, NewFranchise};
use crate::store::RepositoryError;

/// Storage abstraction for the franchise collection.
pub trait FranchiseRepository: Send + Sync {
    fn insert(&self, new: NewFranchise) -> Result<Franchise, RepositoryError>;
    fn fetch(&self, id: FranchiseId) -> Result<Option<Franchise>, RepositoryError>;
    fn list(&self) -> Result<Vec<Franchise>, RepositoryError>;
}
