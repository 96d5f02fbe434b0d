use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::{modules::user::schema::UserEntity, utils::double_option};

pub const MIN_HANDICAP: i32 = -10;
pub const MAX_HANDICAP: i32 = 54;

#[derive(Deserialize, Validate)]
pub struct SignUpModel {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[validate(length(min = 1, message = "First name cannot be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    pub last_name: String,
    pub handicap: Option<i32>,
    pub golf_style: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct SignInModel {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Default, Deserialize, Validate)]
pub struct UpdateProfileModel {
    #[validate(length(min = 1, message = "First name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub handicap: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub golf_style: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub profile_picture_url: Option<Option<String>>,
}

impl UpdateProfileModel {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.handicap.is_none()
            && self.golf_style.is_none()
            && self.profile_picture_url.is_none()
    }
}

pub struct InsertUser {
    pub email: String,
    pub hash_password: String,
    pub first_name: String,
    pub last_name: String,
    pub handicap: Option<i32>,
    pub golf_style: Option<String>,
}

pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub handicap: Option<Option<i32>>,
    pub golf_style: Option<Option<String>>,
    pub profile_picture_url: Option<Option<String>>,
}

impl From<UpdateProfileModel> for UpdateUser {
    fn from(model: UpdateProfileModel) -> Self {
        UpdateUser {
            first_name: model.first_name,
            last_name: model.last_name,
            handicap: model.handicap,
            golf_style: model.golf_style,
            profile_picture_url: model.profile_picture_url,
        }
    }
}

#[derive(Serialize)]
pub struct SignUpResponse {
    pub id: i64,
}

#[derive(Serialize)]
pub struct SignInResponse {
    pub access_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub handicap: Option<i32>,
    pub golf_style: Option<String>,
    pub profile_picture_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserEntity> for UserResponse {
    fn from(entity: UserEntity) -> Self {
        UserResponse {
            id: entity.id,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            handicap: entity.handicap,
            golf_style: entity.golf_style,
            profile_picture_url: entity.profile_picture_url,
            created_at: entity.created_at,
        }
    }
}

/// Public profile fields shown next to someone else's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_picture_url: Option<String>,
}

impl From<UserEntity> for UserSummary {
    fn from(user: UserEntity) -> Self {
        UserSummary {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_picture_url: user.profile_picture_url,
        }
    }
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}
