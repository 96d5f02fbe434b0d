use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::modules::{message::schema::MessageEntity, user::model::UserSummary};

#[derive(Deserialize, Validate)]
pub struct SendMessageModel {
    pub recipient_id: i64,
    #[validate(length(min = 1, max = 4000, message = "Content must be 1 to 4000 characters"))]
    pub content: String,
}

#[derive(Deserialize, Validate)]
pub struct MessageQuery {
    #[validate(range(min = 1, message = "user_id parameter is required"))]
    pub user_id: i64,
}

/// Latest message exchanged with one counterpart, plus the counterpart.
#[derive(Debug, Clone, FromRow)]
pub struct ConversationRow {
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_picture_url: Option<String>,
    pub message_id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub content: String,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub unread_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub user: UserSummary,
    pub latest_message: MessageEntity,
    pub unread_count: i64,
}

impl From<ConversationRow> for ConversationResponse {
    fn from(row: ConversationRow) -> Self {
        ConversationResponse {
            user: UserSummary {
                id: row.user_id,
                email: row.email,
                first_name: row.first_name,
                last_name: row.last_name,
                profile_picture_url: row.profile_picture_url,
            },
            latest_message: MessageEntity {
                id: row.message_id,
                sender_id: row.sender_id,
                recipient_id: row.recipient_id,
                content: row.content,
                is_read: row.is_read,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            unread_count: row.unread_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    pub updated: u64,
}
