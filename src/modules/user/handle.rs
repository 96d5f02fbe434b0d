use actix_web::{
    cookie::{time, Cookie},
    get, patch, post, web, HttpRequest,
};

use crate::{
    api::{error, success},
    constants::REFRESH_TOKEN_COOKIE,
    middlewares::CurrentUser,
    modules::user::{model, service::UserService},
    utils::ValidatedJson,
    ENV,
};

fn refresh_cookie(value: String) -> Cookie<'static> {
    Cookie::build(REFRESH_TOKEN_COOKIE, value)
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(ENV.refresh_token_expiration as i64))
        .finish()
}

#[get("/me")]
pub async fn get_me(
    user_service: web::Data<UserService>,
    current_user: CurrentUser,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let user = user_service.get_by_id(current_user.id).await?;
    Ok(success::Success::ok(Some(user)).message("Profile retrieved successfully"))
}

#[patch("/me")]
pub async fn update_me(
    user_service: web::Data<UserService>,
    current_user: CurrentUser,
    changes: ValidatedJson<model::UpdateProfileModel>,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let user = user_service.update_profile(current_user.id, changes.0).await?;
    Ok(success::Success::ok(Some(user)).message("Profile updated successfully"))
}

#[get("/{id:\\d+}")]
pub async fn get_user(
    user_service: web::Data<UserService>,
    user_id: web::Path<i64>,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let user = user_service.get_by_id(user_id.into_inner()).await?;
    Ok(success::Success::ok(Some(user)).message("User retrieved successfully"))
}

#[post("/users")]
pub async fn sign_up(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<model::SignUpModel>,
) -> Result<success::Success<model::SignUpResponse>, error::Error> {
    let user_id = user_service.sign_up(user_data.0).await?;
    Ok(success::Success::created(Some(model::SignUpResponse { id: user_id }))
        .message("Signup successful"))
}

#[post("/login")]
pub async fn sign_in(
    user_service: web::Data<UserService>,
    credentials: ValidatedJson<model::SignInModel>,
) -> Result<success::Success<model::SignInResponse>, error::Error> {
    let result = user_service.sign_in(credentials.0).await?;
    let response = model::SignInResponse { access_token: result.access_token, user: result.user };

    Ok(success::Success::ok(Some(response))
        .message("Signin successful")
        .cookies(vec![refresh_cookie(result.refresh_token)]))
}

#[post("/logout")]
pub async fn sign_out(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let refresh_token = req.cookie(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_string());
    user_service.sign_out(refresh_token).await?;
    let cleared = Cookie::build(REFRESH_TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(0))
        .expires(time::OffsetDateTime::UNIX_EPOCH)
        .finish();

    Ok(success::Success::no_content().cookies(vec![cleared]))
}

#[post("/refresh")]
pub async fn refresh(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<success::Success<model::RefreshResponse>, error::Error> {
    let refresh_token = req.cookie(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_string());
    let (access_token, refresh_token) = user_service.refresh(refresh_token).await?;

    Ok(success::Success::ok(Some(model::RefreshResponse { access_token }))
        .message("Refresh successful")
        .cookies(vec![refresh_cookie(refresh_token)]))
}
