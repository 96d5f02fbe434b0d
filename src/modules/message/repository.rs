use crate::{
    api::error,
    modules::message::{model::ConversationRow, schema::MessageEntity},
};

#[async_trait::async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(
        &self,
        sender_id: i64,
        recipient_id: i64,
        content: &str,
    ) -> Result<MessageEntity, error::SystemError>;

    /// Both directions between the two users, oldest first.
    async fn list_between(
        &self,
        user_a: i64,
        user_b: i64,
    ) -> Result<Vec<MessageEntity>, error::SystemError>;

    /// One row per counterpart of `user_id`, carrying the latest message.
    async fn find_conversations(
        &self,
        user_id: i64,
    ) -> Result<Vec<ConversationRow>, error::SystemError>;

    /// Marks messages from `sender_id` to `recipient_id` as read.
    async fn mark_read(&self, recipient_id: i64, sender_id: i64)
        -> Result<u64, error::SystemError>;
}
