use crate::{
    api::error,
    modules::like::{
        repository::LikeRepository,
        schema::{LikeEntity, LikeableKind},
    },
};

#[derive(Clone)]
pub struct LikeRepositoryPg {
    pool: sqlx::PgPool,
}

impl LikeRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl LikeRepository for LikeRepositoryPg {
    async fn find_like(
        &self,
        user_id: i64,
        kind: LikeableKind,
        likeable_id: i64,
    ) -> Result<Option<LikeEntity>, error::SystemError> {
        let like = sqlx::query_as::<_, LikeEntity>(
            r#"
            SELECT * FROM likes
            WHERE user_id = $1 AND likeable_type = $2 AND likeable_id = $3
            "#,
        )
        .bind(user_id)
        .bind(kind)
        .bind(likeable_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(like)
    }

    async fn create(
        &self,
        user_id: i64,
        kind: LikeableKind,
        likeable_id: i64,
    ) -> Result<LikeEntity, error::SystemError> {
        let like = sqlx::query_as::<_, LikeEntity>(
            r#"
            INSERT INTO likes (user_id, likeable_type, likeable_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(kind)
        .bind(likeable_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(like)
    }

    async fn delete_like(&self, id: i64) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM likes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }

    async fn count_likes(
        &self,
        kind: LikeableKind,
        likeable_id: i64,
    ) -> Result<i64, error::SystemError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM likes WHERE likeable_type = $1 AND likeable_id = $2",
        )
        .bind(kind)
        .bind(likeable_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
