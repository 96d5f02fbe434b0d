use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};

/// What a like points at. Likes are polymorphic over posts and comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(type_name = "likeable_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LikeableKind {
    Post,
    Comment,
}

impl LikeableKind {
    pub fn label(self) -> &'static str {
        match self {
            LikeableKind::Post => "post",
            LikeableKind::Comment => "comment",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LikeEntity {
    pub id: i64,
    pub user_id: i64,
    pub likeable_type: LikeableKind,
    pub likeable_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
