use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::modules::{
    buddy::schema::{BuddyRequestEntity, BuddyStatus},
    user::model::UserSummary,
};

/// A buddy request as seen by one of its parties: `user` is the other party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuddyRequestResponse {
    pub id: i64,
    pub status: BuddyStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user: UserSummary,
}

impl BuddyRequestResponse {
    pub fn new(request: &BuddyRequestEntity, counterpart: UserSummary) -> Self {
        BuddyRequestResponse {
            id: request.id,
            status: request.status,
            created_at: request.created_at,
            user: counterpart,
        }
    }
}

/// Request joined with the counterpart's public profile.
#[derive(Debug, Clone, FromRow)]
pub struct BuddyRequestUserRow {
    pub req_id: i64,
    pub status: BuddyStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_picture_url: Option<String>,
}

impl From<BuddyRequestUserRow> for BuddyRequestResponse {
    fn from(row: BuddyRequestUserRow) -> Self {
        BuddyRequestResponse {
            id: row.req_id,
            status: row.status,
            created_at: row.created_at,
            user: UserSummary {
                id: row.user_id,
                email: row.email,
                first_name: row.first_name,
                last_name: row.last_name,
                profile_picture_url: row.profile_picture_url,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingRequests {
    pub received_requests: Vec<BuddyRequestResponse>,
    pub sent_requests: Vec<BuddyRequestResponse>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    Created(BuddyRequestResponse),
    /// The target had already asked; their request was accepted instead.
    AutoAccepted(BuddyRequestResponse),
}

impl SendOutcome {
    pub fn request(&self) -> &BuddyRequestResponse {
        match self {
            SendOutcome::Created(r) | SendOutcome::AutoAccepted(r) => r,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStatus {
    None,
    PendingSent,
    PendingReceived,
    Buddies,
}

#[derive(Debug, Serialize)]
pub struct RelationshipResponse {
    pub user_id: i64,
    pub status: RelationshipStatus,
}
