use std::sync::Arc;

use log::info;

use crate::{
    api::error,
    modules::{
        comment::{model::CommentResponse, repository::CommentRepository},
        post::repository::PostRepository,
    },
};

#[derive(Clone)]
pub struct CommentService<C, P>
where
    C: CommentRepository,
    P: PostRepository,
{
    comment_repo: Arc<C>,
    post_repo: Arc<P>,
}

impl<C, P> CommentService<C, P>
where
    C: CommentRepository,
    P: PostRepository,
{
    pub fn with_dependencies(comment_repo: Arc<C>, post_repo: Arc<P>) -> Self {
        CommentService { comment_repo, post_repo }
    }

    async fn ensure_post(&self, post_id: i64) -> Result<(), error::SystemError> {
        match self.post_repo.find_by_id(post_id).await? {
            Some(_) => Ok(()),
            None => Err(error::SystemError::not_found("Post not found")),
        }
    }

    pub async fn list(&self, post_id: i64) -> Result<Vec<CommentResponse>, error::SystemError> {
        self.ensure_post(post_id).await?;
        let rows = self.comment_repo.list_for_post(post_id).await?;
        Ok(rows.into_iter().map(CommentResponse::from).collect())
    }

    pub async fn create(
        &self,
        user_id: i64,
        post_id: i64,
        content: &str,
    ) -> Result<CommentResponse, error::SystemError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(error::SystemError::bad_request("Content can't be blank"));
        }
        self.ensure_post(post_id).await?;

        let comment = self.comment_repo.create(user_id, post_id, content).await?;
        info!("User {} commented {} on post {}", user_id, comment.id, post_id);

        self.comment_repo
            .find_row(comment.id)
            .await?
            .map(CommentResponse::from)
            .ok_or_else(|| error::SystemError::not_found("Comment not found"))
    }
}
