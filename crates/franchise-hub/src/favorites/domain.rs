use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::UserId;
use crate::catalog::FranchiseId;

/// Identifier wrapper for favorite rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavoriteId(pub i64);

/// A stored bookmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Favorite {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub franchise_id: FranchiseId,
    pub created_at: DateTime<Utc>,
}

/// A bookmark joined with the franchise name for the listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteView {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub franchise_id: FranchiseId,
    pub created_at: DateTime<Utc>,
    pub franchise_name: String,
}

/// Insert payload for a bookmark.
#[derive(Debug, Clone, Copy)]
pub struct NewFavorite {
    pub user_id: UserId,
    pub franchise_id: FranchiseId,
}

/// Wire payload for `POST /api/favorites`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub franchise_id: Option<FranchiseId>,
}
