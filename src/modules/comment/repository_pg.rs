use crate::{
    api::error,
    modules::comment::{model::CommentRow, repository::CommentRepository, schema::CommentEntity},
};

const COMMENT_ROW_SELECT: &str = r#"
    SELECT
        c.id,
        c.post_id,
        c.content,
        c.created_at,
        u.id AS user_id,
        u.email,
        u.first_name,
        u.last_name,
        u.profile_picture_url,
        (SELECT COUNT(*) FROM likes l
            WHERE l.likeable_type = 'comment' AND l.likeable_id = c.id) AS like_count
    FROM comments c
    JOIN users u ON u.id = c.user_id
"#;

#[derive(Clone)]
pub struct CommentRepositoryPg {
    pool: sqlx::PgPool,
}

impl CommentRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CommentRepository for CommentRepositoryPg {
    async fn find_by_id(&self, id: i64) -> Result<Option<CommentEntity>, error::SystemError> {
        let comment = sqlx::query_as::<_, CommentEntity>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(comment)
    }

    async fn find_row(&self, id: i64) -> Result<Option<CommentRow>, error::SystemError> {
        let query = format!("{COMMENT_ROW_SELECT} WHERE c.id = $1");
        let row = sqlx::query_as::<_, CommentRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<CommentRow>, error::SystemError> {
        let query =
            format!("{COMMENT_ROW_SELECT} WHERE c.post_id = $1 ORDER BY c.created_at, c.id");
        let rows = sqlx::query_as::<_, CommentRow>(&query)
            .bind(post_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create(
        &self,
        user_id: i64,
        post_id: i64,
        content: &str,
    ) -> Result<CommentEntity, error::SystemError> {
        let comment = sqlx::query_as::<_, CommentEntity>(
            "INSERT INTO comments (user_id, post_id, content) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(user_id)
        .bind(post_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }
}
