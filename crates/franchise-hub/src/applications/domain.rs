use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::UserId;
use crate::catalog::FranchiseId;

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub i64);

/// Lifecycle state of an application. `Pending` is the only non-terminal
/// state; both decisions are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(ApplicationStatus::Pending),
            "approved" => Some(ApplicationStatus::Approved),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }
}

/// The two moderation outcomes. Parsed from the wire so that anything else
/// fails validation before touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationDecision {
    Approved,
    Rejected,
}

impl ModerationDecision {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "approved" => Some(ModerationDecision::Approved),
            "rejected" => Some(ModerationDecision::Rejected),
            _ => None,
        }
    }

    pub const fn status(self) -> ApplicationStatus {
        match self {
            ModerationDecision::Approved => ApplicationStatus::Approved,
            ModerationDecision::Rejected => ApplicationStatus::Rejected,
        }
    }
}

/// A stored application row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub user_id: UserId,
    pub franchise_id: FranchiseId,
    pub status: ApplicationStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An application row joined with the franchise it targets, as served to
/// the applicant's listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    pub id: ApplicationId,
    pub user_id: UserId,
    pub franchise_id: FranchiseId,
    pub status: ApplicationStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub franchise_name: String,
}

/// Insert payload for a new application; the status is always `Pending`.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub user_id: UserId,
    pub franchise_id: FranchiseId,
    pub message: Option<String>,
}

/// Wire payload for `POST /api/applications`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub franchise_id: Option<FranchiseId>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Wire payload for `PATCH /api/applications/:application_id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModerationRequest {
    #[serde(default)]
    pub status: Option<String>,
}
