use std::sync::Arc;

use log::{debug, info};

use crate::{
    api::error,
    modules::{
        comment::repository::CommentRepository,
        like::{
            model::{LikeOutcome, LikeStatusResponse},
            repository::LikeRepository,
            schema::LikeableKind,
        },
        post::repository::PostRepository,
    },
};

#[derive(Clone)]
pub struct LikeService<L, P, C>
where
    L: LikeRepository,
    P: PostRepository,
    C: CommentRepository,
{
    like_repo: Arc<L>,
    post_repo: Arc<P>,
    comment_repo: Arc<C>,
}

impl<L, P, C> LikeService<L, P, C>
where
    L: LikeRepository,
    P: PostRepository,
    C: CommentRepository,
{
    pub fn with_dependencies(like_repo: Arc<L>, post_repo: Arc<P>, comment_repo: Arc<C>) -> Self {
        LikeService { like_repo, post_repo, comment_repo }
    }

    async fn ensure_target(&self, kind: LikeableKind, id: i64) -> Result<(), error::SystemError> {
        let exists = match kind {
            LikeableKind::Post => self.post_repo.find_by_id(id).await?.is_some(),
            LikeableKind::Comment => self.comment_repo.find_by_id(id).await?.is_some(),
        };

        if !exists {
            let message = match kind {
                LikeableKind::Post => "Post not found",
                LikeableKind::Comment => "Comment not found",
            };
            return Err(error::SystemError::not_found(message));
        }
        Ok(())
    }

    pub async fn like(
        &self,
        user_id: i64,
        kind: LikeableKind,
        id: i64,
    ) -> Result<LikeOutcome, error::SystemError> {
        self.ensure_target(kind, id).await?;

        if self.like_repo.find_like(user_id, kind, id).await?.is_some() {
            debug!("User {} already liked {} {}", user_id, kind.label(), id);
            return Ok(LikeOutcome::AlreadyLiked);
        }

        match self.like_repo.create(user_id, kind, id).await {
            Ok(like) => {
                info!("User {} liked {} {}", user_id, kind.label(), id);
                Ok(LikeOutcome::Created(like))
            }
            Err(e) if e.is_conflict() => Ok(LikeOutcome::AlreadyLiked),
            Err(e) => Err(e),
        }
    }

    pub async fn unlike(
        &self,
        user_id: i64,
        kind: LikeableKind,
        id: i64,
    ) -> Result<(), error::SystemError> {
        self.ensure_target(kind, id).await?;

        let like = self.like_repo.find_like(user_id, kind, id).await?.ok_or_else(|| {
            error::SystemError::not_found(format!("You have not liked this {}.", kind.label()))
        })?;

        self.like_repo.delete_like(like.id).await?;
        info!("User {} unliked {} {}", user_id, kind.label(), id);
        Ok(())
    }

    pub async fn status(
        &self,
        user_id: i64,
        kind: LikeableKind,
        id: i64,
    ) -> Result<LikeStatusResponse, error::SystemError> {
        self.ensure_target(kind, id).await?;

        let (like_count, own) = tokio::try_join!(
            self.like_repo.count_likes(kind, id),
            self.like_repo.find_like(user_id, kind, id),
        )?;

        Ok(LikeStatusResponse { like_count, user_liked: own.is_some() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::MemoryStore;

    type Svc = LikeService<MemoryStore, MemoryStore, MemoryStore>;

    struct Fixture {
        svc: Svc,
        alice: i64,
        bob: i64,
        post: i64,
        comment: i64,
    }

    fn setup() -> Fixture {
        let store = Arc::new(MemoryStore::default());
        let alice = store.add_user("alice@example.com", "Alice", "Eagle");
        let bob = store.add_user("bob@example.com", "Bob", "Birdie");
        let post = store.insert_post(alice, "Hole in one!");
        let comment = store.insert_comment(bob, post, "Congrats");
        let svc = LikeService::with_dependencies(store.clone(), store.clone(), store);
        Fixture { svc, alice, bob, post, comment }
    }

    #[tokio::test]
    async fn like_then_status() {
        let f = setup();
        let outcome = f.svc.like(f.bob, LikeableKind::Post, f.post).await.unwrap();
        assert!(matches!(outcome, LikeOutcome::Created(_)));

        let mine = f.svc.status(f.bob, LikeableKind::Post, f.post).await.unwrap();
        assert_eq!(mine, LikeStatusResponse { like_count: 1, user_liked: true });
        let theirs = f.svc.status(f.alice, LikeableKind::Post, f.post).await.unwrap();
        assert_eq!(theirs, LikeStatusResponse { like_count: 1, user_liked: false });
    }

    #[tokio::test]
    async fn second_like_reports_already_liked() {
        let f = setup();
        f.svc.like(f.bob, LikeableKind::Comment, f.comment).await.unwrap();
        let again = f.svc.like(f.bob, LikeableKind::Comment, f.comment).await.unwrap();

        assert!(matches!(again, LikeOutcome::AlreadyLiked));
        let status = f.svc.status(f.bob, LikeableKind::Comment, f.comment).await.unwrap();
        assert_eq!(status.like_count, 1);
    }

    #[tokio::test]
    async fn post_and_comment_likes_are_separate() {
        let f = setup();
        // Same numeric id, different kind.
        f.svc.like(f.alice, LikeableKind::Post, f.post).await.unwrap();
        let status = f.svc.status(f.alice, LikeableKind::Comment, f.comment).await.unwrap();
        assert_eq!(status, LikeStatusResponse { like_count: 0, user_liked: false });
    }

    #[tokio::test]
    async fn unlike_requires_existing_like() {
        let f = setup();
        let err = f.svc.unlike(f.bob, LikeableKind::Post, f.post).await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));

        f.svc.like(f.bob, LikeableKind::Post, f.post).await.unwrap();
        f.svc.unlike(f.bob, LikeableKind::Post, f.post).await.unwrap();
        let status = f.svc.status(f.bob, LikeableKind::Post, f.post).await.unwrap();
        assert_eq!(status.like_count, 0);
    }

    #[tokio::test]
    async fn missing_target_is_not_found() {
        let f = setup();
        assert!(f.svc.like(f.bob, LikeableKind::Post, 404).await.is_err());
        assert!(f.svc.status(f.bob, LikeableKind::Comment, 404).await.is_err());
    }
}
