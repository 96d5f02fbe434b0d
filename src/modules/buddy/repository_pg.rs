use crate::{
    api::error,
    modules::{
        buddy::{
            model::BuddyRequestUserRow,
            repository::BuddyRequestRepository,
            schema::{BuddyRequestEntity, BuddyStatus},
        },
        user::model::UserSummary,
    },
};

#[derive(Clone)]
pub struct BuddyRequestRepositoryPg {
    pool: sqlx::PgPool,
}

impl BuddyRequestRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl BuddyRequestRepository for BuddyRequestRepositoryPg {
    async fn find_by_id(&self, id: i64) -> Result<Option<BuddyRequestEntity>, error::SystemError> {
        let request =
            sqlx::query_as::<_, BuddyRequestEntity>("SELECT * FROM buddy_requests WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(request)
    }

    async fn find_between(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> Result<Option<BuddyRequestEntity>, error::SystemError> {
        let request = sqlx::query_as::<_, BuddyRequestEntity>(
            "SELECT * FROM buddy_requests WHERE sender_id = $1 AND receiver_id = $2",
        )
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    async fn are_buddies(&self, user_a: i64, user_b: i64) -> Result<bool, error::SystemError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM buddy_requests
                WHERE status = 'accepted'
                  AND (
                       (sender_id = $1 AND receiver_id = $2)
                    OR (sender_id = $2 AND receiver_id = $1)
                  )
            )
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_pending_received(
        &self,
        user_id: i64,
    ) -> Result<Vec<BuddyRequestUserRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, BuddyRequestUserRow>(
            r#"
            SELECT
                br.id AS req_id,
                br.status,
                br.created_at,
                u.id AS user_id,
                u.email,
                u.first_name,
                u.last_name,
                u.profile_picture_url
            FROM buddy_requests br
            JOIN users u
                ON br.sender_id = u.id
            WHERE br.receiver_id = $1
              AND br.status = 'pending'
            ORDER BY br.created_at, br.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_pending_sent(
        &self,
        user_id: i64,
    ) -> Result<Vec<BuddyRequestUserRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, BuddyRequestUserRow>(
            r#"
            SELECT
                br.id AS req_id,
                br.status,
                br.created_at,
                u.id AS user_id,
                u.email,
                u.first_name,
                u.last_name,
                u.profile_picture_url
            FROM buddy_requests br
            JOIN users u
                ON br.receiver_id = u.id
            WHERE br.sender_id = $1
              AND br.status = 'pending'
            ORDER BY br.created_at, br.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_buddies(&self, user_id: i64) -> Result<Vec<UserSummary>, error::SystemError> {
        let buddies = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT DISTINCT
                u.id,
                u.email,
                u.first_name,
                u.last_name,
                u.profile_picture_url
            FROM buddy_requests br
            JOIN users u
                ON u.id = CASE
                    WHEN br.sender_id = $1 THEN br.receiver_id
                    ELSE br.sender_id
                END
            WHERE br.status = 'accepted'
              AND (br.sender_id = $1 OR br.receiver_id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(buddies)
    }

    async fn create(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> Result<BuddyRequestEntity, error::SystemError> {
        let request = sqlx::query_as::<_, BuddyRequestEntity>(
            r#"
            INSERT INTO buddy_requests (sender_id, receiver_id, status)
            VALUES ($1, $2, 'pending')
            RETURNING *
            "#,
        )
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    async fn update_status(
        &self,
        id: i64,
        status: BuddyStatus,
    ) -> Result<Option<BuddyRequestEntity>, error::SystemError> {
        let request = sqlx::query_as::<_, BuddyRequestEntity>(
            r#"
            UPDATE buddy_requests
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    async fn delete(&self, id: i64) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM buddy_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }
}
