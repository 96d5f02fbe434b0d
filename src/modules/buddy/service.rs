use std::{collections::HashSet, sync::Arc};

use log::{debug, info};

use crate::modules::{
    buddy::{
        error::BuddyError,
        model::{BuddyRequestResponse, PendingRequests, RelationshipStatus, SendOutcome},
        repository::BuddyRequestRepository,
        schema::{BuddyRequestEntity, BuddyStatus},
    },
    user::{model::UserSummary, repository::UserRepository},
};

/// Resolves the relationship from `user`'s point of view given the request it
/// sent to the other party and the one it received from them.
///
/// Checked in order: buddies, pending sent, pending received.
pub fn derive_relationship(
    sent: Option<&BuddyRequestEntity>,
    received: Option<&BuddyRequestEntity>,
) -> RelationshipStatus {
    let has = |req: Option<&BuddyRequestEntity>, status: BuddyStatus| {
        req.is_some_and(|r| r.status == status)
    };

    if has(sent, BuddyStatus::Accepted) || has(received, BuddyStatus::Accepted) {
        RelationshipStatus::Buddies
    } else if has(sent, BuddyStatus::Pending) {
        RelationshipStatus::PendingSent
    } else if has(received, BuddyStatus::Pending) {
        RelationshipStatus::PendingReceived
    } else {
        RelationshipStatus::None
    }
}

/// Buddy relationship manager. Every operation takes the acting user
/// explicitly; the buddies relation is always read from storage.
#[derive(Clone)]
pub struct BuddyService<R, U>
where
    R: BuddyRequestRepository,
    U: UserRepository,
{
    buddy_repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> BuddyService<R, U>
where
    R: BuddyRequestRepository,
    U: UserRepository,
{
    pub fn with_dependencies(buddy_repo: Arc<R>, user_repo: Arc<U>) -> Self {
        BuddyService { buddy_repo, user_repo }
    }

    async fn find_user(&self, user_id: i64) -> Result<UserSummary, BuddyError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .map(UserSummary::from)
            .ok_or_else(|| BuddyError::NotFound("User not found".into()))
    }

    async fn find_request(&self, request_id: i64) -> Result<BuddyRequestEntity, BuddyError> {
        self.buddy_repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| BuddyError::NotFound("Buddy request not found".into()))
    }

    pub async fn send_request(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> Result<SendOutcome, BuddyError> {
        if sender_id == receiver_id {
            return Err(BuddyError::InvalidTarget);
        }

        let receiver = self.find_user(receiver_id).await?;

        if self.buddy_repo.are_buddies(sender_id, receiver_id).await? {
            return Err(BuddyError::AlreadyBuddies);
        }

        let (sent, received) = tokio::try_join!(
            self.buddy_repo.find_between(sender_id, receiver_id),
            self.buddy_repo.find_between(receiver_id, sender_id),
        )?;

        if sent.as_ref().is_some_and(BuddyRequestEntity::is_pending) {
            return Err(BuddyError::DuplicateRequest);
        }

        if let Some(existing) = received.filter(BuddyRequestEntity::is_pending) {
            let accepted = self
                .buddy_repo
                .update_status(existing.id, BuddyStatus::Accepted)
                .await?
                .ok_or_else(|| BuddyError::NotFound("Buddy request not found".into()))?;

            info!(
                "Buddy request {} from {} auto-accepted by {}",
                accepted.id, receiver_id, sender_id
            );
            return Ok(SendOutcome::AutoAccepted(BuddyRequestResponse::new(&accepted, receiver)));
        }

        // A stale accepted/declined row for this ordered pair, or a concurrent
        // insert, trips the unique index and surfaces as DuplicateRequest.
        let created = self.buddy_repo.create(sender_id, receiver_id).await?;
        info!("Buddy request {} sent from {} to {}", created.id, sender_id, receiver_id);

        Ok(SendOutcome::Created(BuddyRequestResponse::new(&created, receiver)))
    }

    pub async fn accept(
        &self,
        request_id: i64,
        acting_user_id: i64,
    ) -> Result<BuddyRequestResponse, BuddyError> {
        self.respond(request_id, acting_user_id, BuddyStatus::Accepted).await
    }

    pub async fn decline(
        &self,
        request_id: i64,
        acting_user_id: i64,
    ) -> Result<BuddyRequestResponse, BuddyError> {
        self.respond(request_id, acting_user_id, BuddyStatus::Declined).await
    }

    /// Receiver-only status change. The update is unconditional, so answering
    /// an already answered request overwrites its status.
    async fn respond(
        &self,
        request_id: i64,
        acting_user_id: i64,
        status: BuddyStatus,
    ) -> Result<BuddyRequestResponse, BuddyError> {
        let request = self.find_request(request_id).await?;

        if request.receiver_id != acting_user_id {
            return Err(BuddyError::Forbidden(
                "You are not authorized to perform this action".into(),
            ));
        }

        if !request.is_pending() {
            debug!("Buddy request {} re-answered while {:?}", request.id, request.status);
        }

        let updated = self
            .buddy_repo
            .update_status(request_id, status)
            .await?
            .ok_or_else(|| BuddyError::NotFound("Buddy request not found".into()))?;

        info!("Buddy request {} marked {:?} by {}", updated.id, updated.status, acting_user_id);

        let sender = self.find_user(updated.sender_id).await?;
        Ok(BuddyRequestResponse::new(&updated, sender))
    }

    pub async fn remove(&self, request_id: i64, acting_user_id: i64) -> Result<(), BuddyError> {
        let request = self.find_request(request_id).await?;

        if !request.involves(acting_user_id) {
            return Err(BuddyError::Forbidden(
                "You are not authorized to perform this action".into(),
            ));
        }

        self.buddy_repo.delete(request_id).await?;
        info!("Buddy request {} removed by {}", request_id, acting_user_id);
        Ok(())
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<PendingRequests, BuddyError> {
        let (received, sent) = tokio::try_join!(
            self.buddy_repo.find_pending_received(user_id),
            self.buddy_repo.find_pending_sent(user_id),
        )?;

        debug!("User {} has {} received / {} sent pending", user_id, received.len(), sent.len());

        Ok(PendingRequests {
            received_requests: received.into_iter().map(BuddyRequestResponse::from).collect(),
            sent_requests: sent.into_iter().map(BuddyRequestResponse::from).collect(),
        })
    }

    pub async fn list_buddies(&self, user_id: i64) -> Result<Vec<UserSummary>, BuddyError> {
        let mut buddies = self.buddy_repo.find_buddies(user_id).await?;

        let mut seen = HashSet::with_capacity(buddies.len());
        buddies.retain(|b| seen.insert(b.id));
        Ok(buddies)
    }

    pub async fn relationship_status(
        &self,
        user_id: i64,
        other_id: i64,
    ) -> Result<RelationshipStatus, BuddyError> {
        if user_id == other_id {
            return Err(BuddyError::InvalidTarget);
        }

        self.find_user(other_id).await?;

        let (sent, received) = tokio::try_join!(
            self.buddy_repo.find_between(user_id, other_id),
            self.buddy_repo.find_between(other_id, user_id),
        )?;

        Ok(derive_relationship(sent.as_ref(), received.as_ref()))
    }
}
