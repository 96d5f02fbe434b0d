use crate::{
    api::error,
    modules::message::{
        model::ConversationRow, repository::MessageRepository, schema::MessageEntity,
    },
};

#[derive(Clone)]
pub struct MessageRepositoryPg {
    pool: sqlx::PgPool,
}

impl MessageRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MessageRepository for MessageRepositoryPg {
    async fn create(
        &self,
        sender_id: i64,
        recipient_id: i64,
        content: &str,
    ) -> Result<MessageEntity, error::SystemError> {
        let message = sqlx::query_as::<_, MessageEntity>(
            r#"
            INSERT INTO messages (sender_id, recipient_id, content)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(sender_id)
        .bind(recipient_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    async fn list_between(
        &self,
        user_a: i64,
        user_b: i64,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        let messages = sqlx::query_as::<_, MessageEntity>(
            r#"
            SELECT * FROM messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn find_conversations(
        &self,
        user_id: i64,
    ) -> Result<Vec<ConversationRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, ConversationRow>(
            r#"
            WITH latest AS (
                SELECT DISTINCT ON (counterpart)
                    CASE WHEN m.sender_id = $1 THEN m.recipient_id ELSE m.sender_id END
                        AS counterpart,
                    m.*
                FROM messages m
                WHERE m.sender_id = $1 OR m.recipient_id = $1
                ORDER BY counterpart, m.created_at DESC, m.id DESC
            )
            SELECT
                u.id AS user_id,
                u.email,
                u.first_name,
                u.last_name,
                u.profile_picture_url,
                l.id AS message_id,
                l.sender_id,
                l.recipient_id,
                l.content,
                l.is_read,
                l.created_at,
                l.updated_at,
                (SELECT COUNT(*) FROM messages um
                    WHERE um.sender_id = l.counterpart
                      AND um.recipient_id = $1
                      AND NOT um.is_read) AS unread_count
            FROM latest l
            JOIN users u ON u.id = l.counterpart
            ORDER BY l.created_at DESC, l.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn mark_read(
        &self,
        recipient_id: i64,
        sender_id: i64,
    ) -> Result<u64, error::SystemError> {
        let rows = sqlx::query(
            r#"
            UPDATE messages
            SET is_read = TRUE, updated_at = NOW()
            WHERE recipient_id = $1 AND sender_id = $2 AND NOT is_read
            "#,
        )
        .bind(recipient_id)
        .bind(sender_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows)
    }
}
