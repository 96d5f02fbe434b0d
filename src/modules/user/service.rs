use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::configs::{cache_get, cache_set, AuthConfig, CacheStore};
use crate::constants::USER_CACHE_TTL_SECONDS;
use crate::modules::user::model::{
    InsertUser, SignInModel, SignUpModel, UpdateProfileModel, UpdateUser, UserResponse,
    MAX_HANDICAP, MIN_HANDICAP,
};
use crate::modules::user::repository::UserRepository;
use crate::utils::{hash_password, verify_password, Claims, TypeClaims};

pub struct SignInResult {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    cache: Arc<dyn CacheStore>,
    auth: AuthConfig,
}

fn user_key(id: i64) -> String {
    format!("user:{id}")
}

fn refresh_key(jti: &Uuid) -> String {
    format!("refresh_token:{jti}")
}

fn check_handicap(handicap: Option<i32>) -> Result<(), error::SystemError> {
    match handicap {
        Some(h) if !(MIN_HANDICAP..=MAX_HANDICAP).contains(&h) => Err(
            error::SystemError::bad_request(format!(
                "Handicap must be between {MIN_HANDICAP} and {MAX_HANDICAP}"
            )),
        ),
        _ => Ok(()),
    }
}

impl UserService {
    pub fn with_dependencies(
        repo: Arc<dyn UserRepository>,
        cache: Arc<dyn CacheStore>,
        auth: AuthConfig,
    ) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo, cache, auth }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<UserResponse, error::SystemError> {
        let key = user_key(id);
        if let Some(cached_user) = cache_get::<UserResponse>(self.cache.as_ref(), &key).await? {
            log::debug!("User {} found in cache", id);
            return Ok(cached_user);
        }

        let entity = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        let user = UserResponse::from(entity);
        cache_set(self.cache.as_ref(), &key, &user, USER_CACHE_TTL_SECONDS).await?;
        log::debug!("User {} cached", id);
        Ok(user)
    }

    pub async fn update_profile(
        &self,
        id: i64,
        changes: UpdateProfileModel,
    ) -> Result<UserResponse, error::SystemError> {
        if changes.is_empty() {
            return Err(error::SystemError::bad_request("No fields to update"));
        }
        check_handicap(changes.handicap.flatten())?;

        let updated = self.repo.update(id, &UpdateUser::from(changes)).await?;

        self.cache.delete(&user_key(id)).await?;
        info!("User {} updated profile", id);
        Ok(UserResponse::from(updated))
    }

    pub async fn sign_up(&self, user: SignUpModel) -> Result<i64, error::SystemError> {
        check_handicap(user.handicap)?;
        let hash_password = hash_password(&user.password)?;

        let new_user = InsertUser {
            email: user.email.trim().to_string(),
            hash_password,
            first_name: user.first_name,
            last_name: user.last_name,
            handicap: user.handicap,
            golf_style: user.golf_style,
        };

        let user_id = self.repo.create(&new_user).await?;
        info!("User {} signed up", user_id);
        Ok(user_id)
    }

    pub async fn sign_in(&self, credentials: SignInModel) -> Result<SignInResult, error::SystemError> {
        let user_entity = self
            .repo
            .find_by_email(credentials.email.trim())
            .await?
            .ok_or_else(|| error::SystemError::unauthorized("Invalid email or password"))?;

        if !verify_password(&user_entity.hash_password, &credentials.password)? {
            return Err(error::SystemError::unauthorized("Invalid email or password"));
        }

        let (access_token, refresh_token) = self.issue_tokens(user_entity.id).await?;
        info!("User {} signed in", user_entity.id);

        Ok(SignInResult { access_token, refresh_token, user: UserResponse::from(user_entity) })
    }

    /// Rotates a refresh token: the presented session is revoked and a new pair issued.
    pub async fn refresh(
        &self,
        refresh_token: Option<String>,
    ) -> Result<(String, String), error::SystemError> {
        let token =
            refresh_token.ok_or_else(|| error::SystemError::unauthorized("Missing refresh token"))?;

        let claims = Claims::decode(&token, self.auth.jwt_secret.as_bytes())
            .map_err(|_| error::SystemError::unauthorized("Token Invalid or Expired"))?;

        let jti = match (&claims._type, claims.jti) {
            (Some(TypeClaims::RefreshToken), Some(jti)) => jti,
            _ => return Err(error::SystemError::unauthorized("Token Invalid or Expired")),
        };

        let key = refresh_key(&jti);
        let owner = cache_get::<i64>(self.cache.as_ref(), &key)
            .await?
            .ok_or_else(|| error::SystemError::unauthorized("Session expired"))?;

        if owner != claims.sub {
            return Err(error::SystemError::unauthorized("Token Invalid or Expired"));
        }

        self.cache.delete(&key).await?;
        self.issue_tokens(owner).await
    }

    pub async fn sign_out(&self, refresh_token: Option<String>) -> Result<(), error::SystemError> {
        let Some(token) = refresh_token else {
            return Ok(());
        };

        // An unreadable token has no session to revoke.
        if let Ok(Claims { jti: Some(jti), sub, .. }) =
            Claims::decode(&token, self.auth.jwt_secret.as_bytes())
        {
            self.cache.delete(&refresh_key(&jti)).await?;
            info!("User {} signed out", sub);
        }

        Ok(())
    }

    async fn issue_tokens(&self, user_id: i64) -> Result<(String, String), error::SystemError> {
        let secret = self.auth.jwt_secret.as_bytes();

        let access_token = Claims::new(user_id, self.auth.access_token_expiration)
            .with_type(TypeClaims::AccessToken)
            .encode(secret)?;

        let jti = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let refresh_token = Claims::new(user_id, self.auth.refresh_token_expiration)
            .with_jti(jti)
            .with_type(TypeClaims::RefreshToken)
            .encode(secret)?;

        cache_set(
            self.cache.as_ref(),
            &refresh_key(&jti),
            &user_id,
            self.auth.refresh_token_expiration as usize,
        )
        .await?;

        Ok((access_token, refresh_token))
    }
}
