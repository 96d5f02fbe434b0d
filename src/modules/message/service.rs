use std::sync::Arc;

use log::info;

use crate::{
    api::error,
    modules::{
        message::{model::ConversationResponse, repository::MessageRepository, schema::MessageEntity},
        user::repository::UserRepository,
    },
};

#[derive(Clone)]
pub struct MessageService<M, U>
where
    M: MessageRepository,
    U: UserRepository,
{
    message_repo: Arc<M>,
    user_repo: Arc<U>,
}

impl<M, U> MessageService<M, U>
where
    M: MessageRepository,
    U: UserRepository,
{
    pub fn with_dependencies(message_repo: Arc<M>, user_repo: Arc<U>) -> Self {
        MessageService { message_repo, user_repo }
    }

    async fn ensure_user(&self, user_id: i64) -> Result<(), error::SystemError> {
        match self.user_repo.find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(error::SystemError::not_found("User not found")),
        }
    }

    pub async fn send(
        &self,
        sender_id: i64,
        recipient_id: i64,
        content: &str,
    ) -> Result<MessageEntity, error::SystemError> {
        if sender_id == recipient_id {
            return Err(error::SystemError::bad_request("You cannot message yourself"));
        }
        let content = content.trim();
        if content.is_empty() {
            return Err(error::SystemError::bad_request("Content can't be blank"));
        }
        self.ensure_user(recipient_id).await?;

        let message = self.message_repo.create(sender_id, recipient_id, content).await?;
        info!("User {} sent message {} to {}", sender_id, message.id, recipient_id);
        Ok(message)
    }

    pub async fn list(
        &self,
        user_id: i64,
        other_id: i64,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        self.ensure_user(other_id).await?;
        self.message_repo.list_between(user_id, other_id).await
    }

    /// Newest conversation first.
    pub async fn conversations(
        &self,
        user_id: i64,
    ) -> Result<Vec<ConversationResponse>, error::SystemError> {
        let mut conversations: Vec<ConversationResponse> = self
            .message_repo
            .find_conversations(user_id)
            .await?
            .into_iter()
            .map(ConversationResponse::from)
            .collect();

        conversations.sort_by(|a, b| {
            (b.latest_message.created_at, b.latest_message.id)
                .cmp(&(a.latest_message.created_at, a.latest_message.id))
        });
        Ok(conversations)
    }

    pub async fn mark_read(&self, user_id: i64, other_id: i64) -> Result<u64, error::SystemError> {
        self.ensure_user(other_id).await?;
        let updated = self.message_repo.mark_read(user_id, other_id).await?;
        log::debug!("User {} read {} messages from {}", user_id, updated, other_id);
        Ok(updated)
    }
}
