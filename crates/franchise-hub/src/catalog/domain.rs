use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::UserId;

/// Identifier wrapper for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FranchiseId(pub i64);

/// A listed business-format offering. Everything a prospective franchisee
/// sees before applying, plus the optional computation template reference
/// the projection flow may eventually consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Franchise {
    pub id: FranchiseId,
    pub name: String,
    pub description: String,
    pub investment_amount: i64,
    pub format: String,
    pub conditions: String,
    pub contact_info: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new listing.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFranchise {
    pub name: String,
    pub description: String,
    pub investment_amount: i64,
    pub format: String,
    pub conditions: String,
    pub contact_info: String,
    pub template_path: Option<String>,
    pub created_by: Option<UserId>,
}
