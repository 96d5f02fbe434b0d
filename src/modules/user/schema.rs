use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub email: String,
    pub hash_password: String,
    pub first_name: String,
    pub last_name: String,
    pub handicap: Option<i32>,
    pub golf_style: Option<String>,
    pub profile_picture_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
