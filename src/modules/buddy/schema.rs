use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(type_name = "buddy_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BuddyStatus {
    Pending,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct BuddyRequestEntity {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub status: BuddyStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl BuddyRequestEntity {
    pub fn is_pending(&self) -> bool {
        self.status == BuddyStatus::Pending
    }

    pub fn involves(&self, user_id: i64) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }
}
