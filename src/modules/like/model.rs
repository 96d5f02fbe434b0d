use serde::Serialize;

use crate::modules::like::schema::LikeEntity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeStatusResponse {
    pub like_count: i64,
    pub user_liked: bool,
}

#[derive(Debug)]
pub enum LikeOutcome {
    Created(LikeEntity),
    AlreadyLiked,
}
