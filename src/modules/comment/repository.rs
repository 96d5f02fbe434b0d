use crate::{
    api::error,
    modules::comment::{model::CommentRow, schema::CommentEntity},
};

#[async_trait::async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<CommentEntity>, error::SystemError>;

    async fn find_row(&self, id: i64) -> Result<Option<CommentRow>, error::SystemError>;

    /// Oldest first.
    async fn list_for_post(&self, post_id: i64) -> Result<Vec<CommentRow>, error::SystemError>;

    async fn create(
        &self,
        user_id: i64,
        post_id: i64,
        content: &str,
    ) -> Result<CommentEntity, error::SystemError>;
}
