use std::sync::Arc;

use log::info;

use crate::{
    api::error,
    modules::post::{model::PostResponse, repository::PostRepository, schema::PostEntity},
};

#[derive(Clone)]
pub struct PostService<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> PostService<P>
where
    P: PostRepository,
{
    pub fn with_dependencies(post_repo: Arc<P>) -> Self {
        PostService { post_repo }
    }

    pub async fn list(&self) -> Result<Vec<PostResponse>, error::SystemError> {
        let rows = self.post_repo.list().await?;
        Ok(rows.into_iter().map(PostResponse::from).collect())
    }

    async fn response(&self, id: i64) -> Result<PostResponse, error::SystemError> {
        self.post_repo
            .find_row(id)
            .await?
            .map(PostResponse::from)
            .ok_or_else(|| error::SystemError::not_found("Post not found"))
    }

    async fn owned_post(&self, id: i64, user_id: i64) -> Result<PostEntity, error::SystemError> {
        let post = self
            .post_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))?;

        if post.user_id != user_id {
            return Err(error::SystemError::forbidden("You can only modify your own posts"));
        }
        Ok(post)
    }

    pub async fn create(
        &self,
        user_id: i64,
        content: &str,
    ) -> Result<PostResponse, error::SystemError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(error::SystemError::bad_request("Content can't be blank"));
        }

        let post = self.post_repo.create(user_id, content).await?;
        info!("User {} created post {}", user_id, post.id);
        self.response(post.id).await
    }

    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<PostResponse, error::SystemError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(error::SystemError::bad_request("Content can't be blank"));
        }

        self.owned_post(id, user_id).await?;
        self.post_repo
            .update_content(id, content)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))?;

        self.response(id).await
    }

    pub async fn delete(&self, id: i64, user_id: i64) -> Result<(), error::SystemError> {
        self.owned_post(id, user_id).await?;
        self.post_repo.delete(id).await?;
        info!("User {} deleted post {}", user_id, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        modules::like::{repository::LikeRepository, schema::LikeableKind},
        test::MemoryStore,
    };

    fn setup() -> (Arc<MemoryStore>, PostService<MemoryStore>, i64, i64) {
        let store = Arc::new(MemoryStore::default());
        let author = store.add_user("author@example.com", "Arnold", "Palmer");
        let other = store.add_user("other@example.com", "Jack", "Nicklaus");
        (store.clone(), PostService::with_dependencies(store), author, other)
    }

    #[tokio::test]
    async fn create_includes_author_and_counts() {
        let (_, svc, author, _) = setup();
        let post = svc.create(author, "  Shot a 79 today  ").await.unwrap();

        assert_eq!(post.content, "Shot a 79 today");
        assert_eq!(post.user.id, author);
        assert_eq!(post.like_count, 0);
        assert_eq!(post.comment_count, 0);
    }

    #[tokio::test]
    async fn blank_content_is_rejected() {
        let (_, svc, author, _) = setup();
        let err = svc.create(author, "   ").await.unwrap_err();
        assert!(matches!(err, error::SystemError::BadRequest(_)));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let (_, svc, author, other) = setup();
        let first = svc.create(author, "first").await.unwrap();
        let second = svc.create(other, "second").await.unwrap();

        let ids: Vec<i64> = svc.list().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn only_author_can_modify() {
        let (_, svc, author, other) = setup();
        let post = svc.create(author, "mine").await.unwrap();

        let err = svc.update(post.id, other, "hijacked").await.unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));
        let err = svc.delete(post.id, other).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));

        let updated = svc.update(post.id, author, "edited").await.unwrap();
        assert_eq!(updated.content, "edited");
    }

    #[tokio::test]
    async fn delete_removes_comments_and_likes() {
        let (store, svc, author, other) = setup();
        let post = svc.create(author, "bye").await.unwrap();
        let comment = store.insert_comment(other, post.id, "nice");
        LikeRepository::create(store.as_ref(), other, LikeableKind::Post, post.id).await.unwrap();
        LikeRepository::create(store.as_ref(), author, LikeableKind::Comment, comment).await.unwrap();

        svc.delete(post.id, author).await.unwrap();

        assert!(svc.list().await.unwrap().is_empty());
        assert_eq!(store.count_likes(LikeableKind::Post, post.id).await.unwrap(), 0);
        assert_eq!(store.count_likes(LikeableKind::Comment, comment).await.unwrap(), 0);
        let err = svc.delete(post.id, author).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }
}
