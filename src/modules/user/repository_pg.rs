use crate::{
    api::error,
    modules::user::{
        model::{InsertUser, UpdateUser},
        repository::UserRepository,
        schema::UserEntity,
    },
};

#[derive(Clone)]
pub struct UserRepositoryPg {
    pool: sqlx::PgPool,
}

impl UserRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserRepository for UserRepositoryPg {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        let user =
            sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE lower(email) = lower($1)")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    async fn create(&self, user: &InsertUser) -> Result<i64, error::SystemError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (email, hash_password, first_name, last_name, handicap, golf_style)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&user.email)
        .bind(&user.hash_password)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.handicap)
        .bind(&user.golf_style)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i64, user: &UpdateUser) -> Result<UserEntity, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>(
            r#"
        UPDATE users
        SET
            first_name          = COALESCE($2, first_name),
            last_name           = COALESCE($3, last_name),
            handicap            = CASE WHEN $4::boolean THEN $5 ELSE handicap END,
            golf_style          = CASE WHEN $6::boolean THEN $7 ELSE golf_style END,
            profile_picture_url = CASE WHEN $8::boolean THEN $9 ELSE profile_picture_url END,
            updated_at          = NOW()
        WHERE id = $1
        RETURNING *
        "#,
        )
        .bind(id)
        .bind(&user.first_name) // $2: Option<String>
        .bind(&user.last_name) // $3: Option<String>
        .bind(user.handicap.is_some()) // $4: was handicap provided?
        .bind(user.handicap.flatten()) // $5: Option<i32>
        .bind(user.golf_style.is_some()) // $6: was golf_style provided?
        .bind(user.golf_style.as_ref().and_then(|v| v.as_ref())) // $7
        .bind(user.profile_picture_url.is_some()) // $8
        .bind(user.profile_picture_url.as_ref().and_then(|v| v.as_ref())) // $9
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        Ok(user)
    }
}
