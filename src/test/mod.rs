//! In-memory doubles for the storage and cache seams, used by service tests.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use chrono::{DateTime, Utc};

use crate::{
    api::error,
    configs::{AuthConfig, CacheStore},
    modules::{
        buddy::{
            model::BuddyRequestUserRow,
            repository::BuddyRequestRepository,
            schema::{BuddyRequestEntity, BuddyStatus},
        },
        comment::{model::CommentRow, repository::CommentRepository, schema::CommentEntity},
        like::{
            repository::LikeRepository,
            schema::{LikeEntity, LikeableKind},
        },
        message::{model::ConversationRow, repository::MessageRepository, schema::MessageEntity},
        post::{model::PostRow, repository::PostRepository, schema::PostEntity},
        user::{
            model::{InsertUser, UpdateUser, UserSummary},
            repository::UserRepository,
            schema::UserEntity,
        },
    },
};

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret".to_string(),
        access_token_expiration: 900,
        refresh_token_expiration: 3600,
    }
}

#[derive(Default)]
struct Sequences {
    user: i64,
    buddy_request: i64,
    post: i64,
    comment: i64,
    like: i64,
    message: i64,
    clock: i64,
}

#[derive(Default)]
struct State {
    seq: Sequences,
    users: Vec<UserEntity>,
    buddy_requests: Vec<BuddyRequestEntity>,
    posts: Vec<PostEntity>,
    comments: Vec<CommentEntity>,
    likes: Vec<LikeEntity>,
    messages: Vec<MessageEntity>,
    cache: HashMap<String, Vec<u8>>,
}

fn next(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl State {
    /// Strictly increasing timestamps so ordering never depends on wall-clock resolution.
    fn now(&mut self) -> DateTime<Utc> {
        let tick = next(&mut self.seq.clock);
        DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000 + tick).unwrap()
    }

    fn user(&self, id: i64) -> Option<&UserEntity> {
        self.users.iter().find(|u| u.id == id)
    }

    fn summary(&self, id: i64) -> Option<UserSummary> {
        self.user(id).cloned().map(UserSummary::from)
    }

    fn count_likes(&self, kind: LikeableKind, id: i64) -> i64 {
        self.likes.iter().filter(|l| l.likeable_type == kind && l.likeable_id == id).count() as i64
    }

    fn buddy_row(&self, req: &BuddyRequestEntity, counterpart: i64) -> Option<BuddyRequestUserRow> {
        let user = self.user(counterpart)?;
        Some(BuddyRequestUserRow {
            req_id: req.id,
            status: req.status,
            created_at: req.created_at,
            user_id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            profile_picture_url: user.profile_picture_url.clone(),
        })
    }

    fn post_row(&self, post: &PostEntity) -> Option<PostRow> {
        let user = self.user(post.user_id)?;
        Some(PostRow {
            id: post.id,
            content: post.content.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
            user_id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            profile_picture_url: user.profile_picture_url.clone(),
            like_count: self.count_likes(LikeableKind::Post, post.id),
            comment_count: self.comments.iter().filter(|c| c.post_id == post.id).count() as i64,
        })
    }

    fn comment_row(&self, comment: &CommentEntity) -> Option<CommentRow> {
        let user = self.user(comment.user_id)?;
        Some(CommentRow {
            id: comment.id,
            post_id: comment.post_id,
            content: comment.content.clone(),
            created_at: comment.created_at,
            user_id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            profile_picture_url: user.profile_picture_url.clone(),
            like_count: self.count_likes(LikeableKind::Comment, comment.id),
        })
    }

    fn insert_user(&mut self, user: &InsertUser) -> Result<i64, error::SystemError> {
        let email = user.email.to_lowercase();
        if self.users.iter().any(|u| u.email.to_lowercase() == email) {
            return Err(error::SystemError::conflict("users_unique_email"));
        }
        let now = self.now();
        let id = next(&mut self.seq.user);
        self.users.push(UserEntity {
            id,
            email: user.email.clone(),
            hash_password: user.hash_password.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            handicap: user.handicap,
            golf_style: user.golf_style.clone(),
            profile_picture_url: None,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    fn insert_buddy_request(
        &mut self,
        sender_id: i64,
        receiver_id: i64,
        status: BuddyStatus,
    ) -> BuddyRequestEntity {
        let now = self.now();
        let request = BuddyRequestEntity {
            id: next(&mut self.seq.buddy_request),
            sender_id,
            receiver_id,
            status,
            created_at: now,
            updated_at: now,
        };
        self.buddy_requests.push(request.clone());
        request
    }

    fn insert_post(&mut self, user_id: i64, content: &str) -> PostEntity {
        let now = self.now();
        let post = PostEntity {
            id: next(&mut self.seq.post),
            user_id,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.posts.push(post.clone());
        post
    }

    fn insert_comment(&mut self, user_id: i64, post_id: i64, content: &str) -> CommentEntity {
        let now = self.now();
        let comment = CommentEntity {
            id: next(&mut self.seq.comment),
            user_id,
            post_id,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.comments.push(comment.clone());
        comment
    }
}

/// Single store backing every repository trait and the cache, with the
/// database's unique constraints and cascades reproduced.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn add_user(&self, email: &str, first_name: &str, last_name: &str) -> i64 {
        self.lock()
            .insert_user(&InsertUser {
                email: email.to_string(),
                hash_password: String::new(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                handicap: None,
                golf_style: None,
            })
            .unwrap()
    }

    pub fn has_cache_key(&self, key: &str) -> bool {
        self.lock().cache.contains_key(key)
    }

    pub fn buddy_request_count(&self) -> usize {
        self.lock().buddy_requests.len()
    }

    /// Writes a row directly, skipping the pair uniqueness check.
    pub fn insert_buddy_request(&self, sender_id: i64, receiver_id: i64, status: BuddyStatus) -> i64 {
        self.lock().insert_buddy_request(sender_id, receiver_id, status).id
    }

    pub fn insert_post(&self, user_id: i64, content: &str) -> i64 {
        self.lock().insert_post(user_id, content).id
    }

    pub fn insert_comment(&self, user_id: i64, post_id: i64, content: &str) -> i64 {
        self.lock().insert_comment(user_id, post_id, content).id
    }
}

#[async_trait::async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.lock().user(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        let email = email.to_lowercase();
        Ok(self.lock().users.iter().find(|u| u.email.to_lowercase() == email).cloned())
    }

    async fn create(&self, user: &InsertUser) -> Result<i64, error::SystemError> {
        self.lock().insert_user(user)
    }

    async fn update(&self, id: i64, user: &UpdateUser) -> Result<UserEntity, error::SystemError> {
        let mut state = self.lock();
        let now = state.now();
        let entity = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        if let Some(first_name) = &user.first_name {
            entity.first_name = first_name.clone();
        }
        if let Some(last_name) = &user.last_name {
            entity.last_name = last_name.clone();
        }
        if let Some(handicap) = user.handicap {
            entity.handicap = handicap;
        }
        if let Some(golf_style) = &user.golf_style {
            entity.golf_style = golf_style.clone();
        }
        if let Some(url) = &user.profile_picture_url {
            entity.profile_picture_url = url.clone();
        }
        entity.updated_at = now;
        Ok(entity.clone())
    }
}

#[async_trait::async_trait]
impl BuddyRequestRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<BuddyRequestEntity>, error::SystemError> {
        Ok(self.lock().buddy_requests.iter().find(|r| r.id == id).cloned())
    }

    async fn find_between(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> Result<Option<BuddyRequestEntity>, error::SystemError> {
        Ok(self
            .lock()
            .buddy_requests
            .iter()
            .find(|r| r.sender_id == sender_id && r.receiver_id == receiver_id)
            .cloned())
    }

    async fn are_buddies(&self, user_a: i64, user_b: i64) -> Result<bool, error::SystemError> {
        Ok(self.lock().buddy_requests.iter().any(|r| {
            r.status == BuddyStatus::Accepted
                && ((r.sender_id == user_a && r.receiver_id == user_b)
                    || (r.sender_id == user_b && r.receiver_id == user_a))
        }))
    }

    async fn find_pending_received(
        &self,
        user_id: i64,
    ) -> Result<Vec<BuddyRequestUserRow>, error::SystemError> {
        let state = self.lock();
        Ok(state
            .buddy_requests
            .iter()
            .filter(|r| r.receiver_id == user_id && r.is_pending())
            .filter_map(|r| state.buddy_row(r, r.sender_id))
            .collect())
    }

    async fn find_pending_sent(
        &self,
        user_id: i64,
    ) -> Result<Vec<BuddyRequestUserRow>, error::SystemError> {
        let state = self.lock();
        Ok(state
            .buddy_requests
            .iter()
            .filter(|r| r.sender_id == user_id && r.is_pending())
            .filter_map(|r| state.buddy_row(r, r.receiver_id))
            .collect())
    }

    async fn find_buddies(&self, user_id: i64) -> Result<Vec<UserSummary>, error::SystemError> {
        let state = self.lock();
        Ok(state
            .buddy_requests
            .iter()
            .filter(|r| r.status == BuddyStatus::Accepted && r.involves(user_id))
            .filter_map(|r| {
                let other = if r.sender_id == user_id { r.receiver_id } else { r.sender_id };
                state.summary(other)
            })
            .collect())
    }

    async fn create(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> Result<BuddyRequestEntity, error::SystemError> {
        let mut state = self.lock();
        if state.user(receiver_id).is_none() || state.user(sender_id).is_none() {
            return Err(error::SystemError::not_found("User not found"));
        }
        if state
            .buddy_requests
            .iter()
            .any(|r| r.sender_id == sender_id && r.receiver_id == receiver_id)
        {
            return Err(error::SystemError::conflict("buddy_requests_sender_receiver_key"));
        }
        Ok(state.insert_buddy_request(sender_id, receiver_id, BuddyStatus::Pending))
    }

    async fn update_status(
        &self,
        id: i64,
        status: BuddyStatus,
    ) -> Result<Option<BuddyRequestEntity>, error::SystemError> {
        let mut state = self.lock();
        let now = state.now();
        Ok(state.buddy_requests.iter_mut().find(|r| r.id == id).map(|r| {
            r.status = status;
            r.updated_at = now;
            r.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, error::SystemError> {
        let mut state = self.lock();
        let before = state.buddy_requests.len();
        state.buddy_requests.retain(|r| r.id != id);
        Ok(state.buddy_requests.len() < before)
    }
}

#[async_trait::async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<PostEntity>, error::SystemError> {
        Ok(self.lock().posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_row(&self, id: i64) -> Result<Option<PostRow>, error::SystemError> {
        let state = self.lock();
        Ok(state.posts.iter().find(|p| p.id == id).and_then(|p| state.post_row(p)))
    }

    async fn list(&self) -> Result<Vec<PostRow>, error::SystemError> {
        let state = self.lock();
        let mut rows: Vec<PostRow> = state.posts.iter().filter_map(|p| state.post_row(p)).collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn create(&self, user_id: i64, content: &str) -> Result<PostEntity, error::SystemError> {
        Ok(self.lock().insert_post(user_id, content))
    }

    async fn update_content(
        &self,
        id: i64,
        content: &str,
    ) -> Result<Option<PostEntity>, error::SystemError> {
        let mut state = self.lock();
        let now = state.now();
        Ok(state.posts.iter_mut().find(|p| p.id == id).map(|p| {
            p.content = content.to_string();
            p.updated_at = now;
            p.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, error::SystemError> {
        let mut state = self.lock();
        if !state.posts.iter().any(|p| p.id == id) {
            return Ok(false);
        }

        let comment_ids: Vec<i64> =
            state.comments.iter().filter(|c| c.post_id == id).map(|c| c.id).collect();
        state.likes.retain(|l| match l.likeable_type {
            LikeableKind::Post => l.likeable_id != id,
            LikeableKind::Comment => !comment_ids.contains(&l.likeable_id),
        });
        state.comments.retain(|c| c.post_id != id);
        state.posts.retain(|p| p.id != id);
        Ok(true)
    }
}

#[async_trait::async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<CommentEntity>, error::SystemError> {
        Ok(self.lock().comments.iter().find(|c| c.id == id).cloned())
    }

    async fn find_row(&self, id: i64) -> Result<Option<CommentRow>, error::SystemError> {
        let state = self.lock();
        Ok(state.comments.iter().find(|c| c.id == id).and_then(|c| state.comment_row(c)))
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<CommentRow>, error::SystemError> {
        let state = self.lock();
        Ok(state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .filter_map(|c| state.comment_row(c))
            .collect())
    }

    async fn create(
        &self,
        user_id: i64,
        post_id: i64,
        content: &str,
    ) -> Result<CommentEntity, error::SystemError> {
        let mut state = self.lock();
        if !state.posts.iter().any(|p| p.id == post_id) {
            return Err(error::SystemError::not_found("Post not found"));
        }
        Ok(state.insert_comment(user_id, post_id, content))
    }
}

#[async_trait::async_trait]
impl LikeRepository for MemoryStore {
    async fn find_like(
        &self,
        user_id: i64,
        kind: LikeableKind,
        likeable_id: i64,
    ) -> Result<Option<LikeEntity>, error::SystemError> {
        Ok(self
            .lock()
            .likes
            .iter()
            .find(|l| l.user_id == user_id && l.likeable_type == kind && l.likeable_id == likeable_id)
            .cloned())
    }

    async fn create(
        &self,
        user_id: i64,
        kind: LikeableKind,
        likeable_id: i64,
    ) -> Result<LikeEntity, error::SystemError> {
        let mut state = self.lock();
        if state
            .likes
            .iter()
            .any(|l| l.user_id == user_id && l.likeable_type == kind && l.likeable_id == likeable_id)
        {
            return Err(error::SystemError::conflict("likes_user_likeable_key"));
        }
        let created_at = state.now();
        let like = LikeEntity {
            id: next(&mut state.seq.like),
            user_id,
            likeable_type: kind,
            likeable_id,
            created_at,
        };
        state.likes.push(like.clone());
        Ok(like)
    }

    async fn delete_like(&self, id: i64) -> Result<bool, error::SystemError> {
        let mut state = self.lock();
        let before = state.likes.len();
        state.likes.retain(|l| l.id != id);
        Ok(state.likes.len() < before)
    }

    async fn count_likes(
        &self,
        kind: LikeableKind,
        likeable_id: i64,
    ) -> Result<i64, error::SystemError> {
        Ok(self.lock().count_likes(kind, likeable_id))
    }
}

#[async_trait::async_trait]
impl MessageRepository for MemoryStore {
    async fn create(
        &self,
        sender_id: i64,
        recipient_id: i64,
        content: &str,
    ) -> Result<MessageEntity, error::SystemError> {
        let mut state = self.lock();
        let now = state.now();
        let message = MessageEntity {
            id: next(&mut state.seq.message),
            sender_id,
            recipient_id,
            content: content.to_string(),
            is_read: false,
            created_at: now,
            updated_at: now,
        };
        state.messages.push(message.clone());
        Ok(message)
    }

    async fn list_between(
        &self,
        user_a: i64,
        user_b: i64,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        Ok(self
            .lock()
            .messages
            .iter()
            .filter(|m| {
                (m.sender_id == user_a && m.recipient_id == user_b)
                    || (m.sender_id == user_b && m.recipient_id == user_a)
            })
            .cloned()
            .collect())
    }

    async fn find_conversations(
        &self,
        user_id: i64,
    ) -> Result<Vec<ConversationRow>, error::SystemError> {
        let state = self.lock();
        let mut latest: HashMap<i64, &MessageEntity> = HashMap::new();
        for m in state.messages.iter().filter(|m| m.sender_id == user_id || m.recipient_id == user_id)
        {
            let other = if m.sender_id == user_id { m.recipient_id } else { m.sender_id };
            latest.insert(other, m);
        }

        Ok(latest
            .into_iter()
            .filter_map(|(other, m)| {
                let user = state.user(other)?;
                let unread_count = state
                    .messages
                    .iter()
                    .filter(|u| u.sender_id == other && u.recipient_id == user_id && !u.is_read)
                    .count() as i64;
                Some(ConversationRow {
                    user_id: user.id,
                    email: user.email.clone(),
                    first_name: user.first_name.clone(),
                    last_name: user.last_name.clone(),
                    profile_picture_url: user.profile_picture_url.clone(),
                    message_id: m.id,
                    sender_id: m.sender_id,
                    recipient_id: m.recipient_id,
                    content: m.content.clone(),
                    is_read: m.is_read,
                    created_at: m.created_at,
                    updated_at: m.updated_at,
                    unread_count,
                })
            })
            .collect())
    }

    async fn mark_read(
        &self,
        recipient_id: i64,
        sender_id: i64,
    ) -> Result<u64, error::SystemError> {
        let mut state = self.lock();
        let now = state.now();
        let mut updated = 0;
        for m in state
            .messages
            .iter_mut()
            .filter(|m| m.recipient_id == recipient_id && m.sender_id == sender_id && !m.is_read)
        {
            m.is_read = true;
            m.updated_at = now;
            updated += 1;
        }
        Ok(updated)
    }
}

#[async_trait::async_trait]
impl CacheStore for MemoryStore {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, error::SystemError> {
        Ok(self.lock().cache.get(key).cloned())
    }

    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        _expiration: usize,
    ) -> Result<(), error::SystemError> {
        self.lock().cache.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), error::SystemError> {
        self.lock().cache.remove(key);
        Ok(())
    }
}
