use super::domain::{Favorite, FavoriteView, NewFavorite};
use crate::accounts::UserId;
use crate::catalog::FranchiseId;
use crate::store::RepositoryError;

/// Storage abstraction for the favorites collection. `insert` maps the
/// `(user, franchise)` uniqueness violation to
/// [`RepositoryError::Conflict`]; `remove` reports a missing row as
/// [`RepositoryError::NotFound`].
pub trait FavoriteRepository: Send + Sync {
    fn insert(&self, new: NewFavorite) -> Result<Favorite, RepositoryError>;
    fn for_user(&self, user: UserId) -> Result<Vec<FavoriteView>, RepositoryError>;
    fn remove(&self, user: UserId, franchise: FranchiseId) -> Result<(), RepositoryError>;
}
