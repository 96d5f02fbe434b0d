use crate::{
    api::error,
    modules::post::{model::PostRow, repository::PostRepository, schema::PostEntity},
};

const POST_ROW_SELECT: &str = r#"
    SELECT
        p.id,
        p.content,
        p.created_at,
        p.updated_at,
        u.id AS user_id,
        u.email,
        u.first_name,
        u.last_name,
        u.profile_picture_url,
        (SELECT COUNT(*) FROM likes l
            WHERE l.likeable_type = 'post' AND l.likeable_id = p.id) AS like_count,
        (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
    FROM posts p
    JOIN users u ON u.id = p.user_id
"#;

#[derive(Clone)]
pub struct PostRepositoryPg {
    pool: sqlx::PgPool,
}

impl PostRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PostRepository for PostRepositoryPg {
    async fn find_by_id(&self, id: i64) -> Result<Option<PostEntity>, error::SystemError> {
        let post = sqlx::query_as::<_, PostEntity>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn find_row(&self, id: i64) -> Result<Option<PostRow>, error::SystemError> {
        let query = format!("{POST_ROW_SELECT} WHERE p.id = $1");
        let row = sqlx::query_as::<_, PostRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<PostRow>, error::SystemError> {
        let query = format!("{POST_ROW_SELECT} ORDER BY p.created_at DESC, p.id DESC");
        let rows = sqlx::query_as::<_, PostRow>(&query).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn create(&self, user_id: i64, content: &str) -> Result<PostEntity, error::SystemError> {
        let post = sqlx::query_as::<_, PostEntity>(
            "INSERT INTO posts (user_id, content) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        Ok(post)
    }

    async fn update_content(
        &self,
        id: i64,
        content: &str,
    ) -> Result<Option<PostEntity>, error::SystemError> {
        let post = sqlx::query_as::<_, PostEntity>(
            "UPDATE posts SET content = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;
        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<bool, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        // Likes are polymorphic and carry no foreign key, so they go first.
        sqlx::query(
            r#"
            DELETE FROM likes
            WHERE (likeable_type = 'post' AND likeable_id = $1)
               OR (likeable_type = 'comment'
                   AND likeable_id IN (SELECT id FROM comments WHERE post_id = $1))
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let rows = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(rows > 0)
    }
}
