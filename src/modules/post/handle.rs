use actix_web::{delete, get, patch, post, web};

use crate::{
    api::{error, success},
    middlewares::CurrentUser,
    modules::post::{
        model::{PostContentModel, PostResponse},
        repository_pg::PostRepositoryPg,
        service::PostService,
    },
    utils::ValidatedJson,
};

pub type PostSvc = PostService<PostRepositoryPg>;

#[get("")]
pub async fn list_posts(
    post_service: web::Data<PostSvc>,
) -> Result<success::Success<Vec<PostResponse>>, error::Error> {
    let posts = post_service.list().await?;
    Ok(success::Success::ok(Some(posts)))
}

#[post("")]
pub async fn create_post(
    post_service: web::Data<PostSvc>,
    current_user: CurrentUser,
    body: ValidatedJson<PostContentModel>,
) -> Result<success::Success<PostResponse>, error::Error> {
    let post = post_service.create(current_user.id, &body.0.content).await?;
    Ok(success::Success::created(Some(post)).message("Post created successfully"))
}

#[patch("/{post_id:\\d+}")]
pub async fn update_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<i64>,
    current_user: CurrentUser,
    body: ValidatedJson<PostContentModel>,
) -> Result<success::Success<PostResponse>, error::Error> {
    let post = post_service.update(post_id.into_inner(), current_user.id, &body.0.content).await?;
    Ok(success::Success::ok(Some(post)).message("Post updated successfully"))
}

#[delete("/{post_id:\\d+}")]
pub async fn delete_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<i64>,
    current_user: CurrentUser,
) -> Result<success::Success<()>, error::Error> {
    post_service.delete(post_id.into_inner(), current_user.id).await?;
    Ok(success::Success::no_content())
}
