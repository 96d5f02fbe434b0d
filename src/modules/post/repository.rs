use crate::{
    api::error,
    modules::post::{model::PostRow, schema::PostEntity},
};

#[async_trait::async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<PostEntity>, error::SystemError>;

    async fn find_row(&self, id: i64) -> Result<Option<PostRow>, error::SystemError>;

    /// Newest first.
    async fn list(&self) -> Result<Vec<PostRow>, error::SystemError>;

    async fn create(&self, user_id: i64, content: &str) -> Result<PostEntity, error::SystemError>;

    async fn update_content(
        &self,
        id: i64,
        content: &str,
    ) -> Result<Option<PostEntity>, error::SystemError>;

    /// Removes the post along with its comments and every like on either.
    async fn delete(&self, id: i64) -> Result<bool, error::SystemError>;
}
