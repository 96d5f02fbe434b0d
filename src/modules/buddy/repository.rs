use crate::{
    api::error,
    modules::{
        buddy::{
            model::BuddyRequestUserRow,
            schema::{BuddyRequestEntity, BuddyStatus},
        },
        user::model::UserSummary,
    },
};

/// Storage for buddy requests. Implementations must enforce uniqueness of the
/// ordered (sender, receiver) pair and report violations as
/// `SystemError::Conflict`.
#[async_trait::async_trait]
pub trait BuddyRequestRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<BuddyRequestEntity>, error::SystemError>;

    /// The request sent from `sender_id` to `receiver_id`, whatever its status.
    async fn find_between(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> Result<Option<BuddyRequestEntity>, error::SystemError>;

    /// Whether an accepted request exists in either direction.
    async fn are_buddies(&self, user_a: i64, user_b: i64) -> Result<bool, error::SystemError>;

    /// Pending requests addressed to `user_id`, joined with each sender.
    async fn find_pending_received(
        &self,
        user_id: i64,
    ) -> Result<Vec<BuddyRequestUserRow>, error::SystemError>;

    /// Pending requests sent by `user_id`, joined with each receiver.
    async fn find_pending_sent(
        &self,
        user_id: i64,
    ) -> Result<Vec<BuddyRequestUserRow>, error::SystemError>;

    async fn find_buddies(&self, user_id: i64) -> Result<Vec<UserSummary>, error::SystemError>;

    async fn create(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> Result<BuddyRequestEntity, error::SystemError>;

    async fn update_status(
        &self,
        id: i64,
        status: BuddyStatus,
    ) -> Result<Option<BuddyRequestEntity>, error::SystemError>;

    async fn delete(&self, id: i64) -> Result<bool, error::SystemError>;
}
