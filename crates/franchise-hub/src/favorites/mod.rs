//! Per-user franchise bookmarks. Pure existence tracking: the only rule is
//! the `(user, franchise)` uniqueness the store enforces.

pub mod domain;
pub mod repository;
pub mod router;

pub use domain::{Favorite, FavoriteId, FavoriteRequest, FavoriteView, NewFavorite};
pub use repository::FavoriteRepository;
pub use router::favorite_router;
