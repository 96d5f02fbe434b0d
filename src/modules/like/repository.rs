use crate::{
    api::error,
    modules::like::schema::{LikeEntity, LikeableKind},
};

#[async_trait::async_trait]
pub trait LikeRepository: Send + Sync {
    async fn find_like(
        &self,
        user_id: i64,
        kind: LikeableKind,
        likeable_id: i64,
    ) -> Result<Option<LikeEntity>, error::SystemError>;

    /// Fails with `SystemError::Conflict` if the user already liked the target.
    async fn create(
        &self,
        user_id: i64,
        kind: LikeableKind,
        likeable_id: i64,
    ) -> Result<LikeEntity, error::SystemError>;

    async fn delete_like(&self, id: i64) -> Result<bool, error::SystemError>;

    async fn count_likes(
        &self,
        kind: LikeableKind,
        likeable_id: i64,
    ) -> Result<i64, error::SystemError>;
}
