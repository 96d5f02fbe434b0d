use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::modules::user::model::UserSummary;

#[derive(Deserialize, Validate)]
pub struct CreateCommentModel {
    #[validate(length(min = 1, max = 2000, message = "Content must be 1 to 2000 characters"))]
    pub content: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_picture_url: Option<String>,
    pub like_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user: UserSummary,
    pub like_count: i64,
}

impl From<CommentRow> for CommentResponse {
    fn from(row: CommentRow) -> Self {
        CommentResponse {
            id: row.id,
            post_id: row.post_id,
            content: row.content,
            created_at: row.created_at,
            user: UserSummary {
                id: row.user_id,
                email: row.email,
                first_name: row.first_name,
                last_name: row.last_name,
                profile_picture_url: row.profile_picture_url,
            },
            like_count: row.like_count,
        }
    }
}
