use actix_web::{delete, get, post, web};

use crate::{
    api::{error, success},
    middlewares::CurrentUser,
    modules::{
        comment::repository_pg::CommentRepositoryPg,
        like::{
            model::{LikeOutcome, LikeStatusResponse},
            repository_pg::LikeRepositoryPg,
            schema::{LikeEntity, LikeableKind},
            service::LikeService,
        },
        post::repository_pg::PostRepositoryPg,
    },
};

pub type LikeSvc = LikeService<LikeRepositoryPg, PostRepositoryPg, CommentRepositoryPg>;

async fn like_target(
    like_service: &LikeSvc,
    user_id: i64,
    kind: LikeableKind,
    id: i64,
) -> Result<success::Success<LikeEntity>, error::Error> {
    Ok(match like_service.like(user_id, kind, id).await? {
        LikeOutcome::Created(like) => success::Success::created(Some(like)),
        LikeOutcome::AlreadyLiked => success::Success::ok(None)
            .message(format!("You have already liked this {}.", kind.label())),
    })
}

async fn unlike_target(
    like_service: &LikeSvc,
    user_id: i64,
    kind: LikeableKind,
    id: i64,
) -> Result<success::Success<()>, error::Error> {
    like_service.unlike(user_id, kind, id).await?;
    Ok(success::Success::ok(None).message(match kind {
        LikeableKind::Post => "Post unliked successfully.",
        LikeableKind::Comment => "Comment unliked successfully.",
    }))
}

#[post("/{post_id:\\d+}/like")]
pub async fn like_post(
    like_service: web::Data<LikeSvc>,
    post_id: web::Path<i64>,
    current_user: CurrentUser,
) -> Result<success::Success<LikeEntity>, error::Error> {
    like_target(&like_service, current_user.id, LikeableKind::Post, post_id.into_inner()).await
}

#[delete("/{post_id:\\d+}/like")]
pub async fn unlike_post(
    like_service: web::Data<LikeSvc>,
    post_id: web::Path<i64>,
    current_user: CurrentUser,
) -> Result<success::Success<()>, error::Error> {
    unlike_target(&like_service, current_user.id, LikeableKind::Post, post_id.into_inner()).await
}

#[get("/{post_id:\\d+}/like/status")]
pub async fn post_like_status(
    like_service: web::Data<LikeSvc>,
    post_id: web::Path<i64>,
    current_user: CurrentUser,
) -> Result<success::Success<LikeStatusResponse>, error::Error> {
    let status =
        like_service.status(current_user.id, LikeableKind::Post, post_id.into_inner()).await?;
    Ok(success::Success::ok(Some(status)))
}

#[post("/{comment_id:\\d+}/like")]
pub async fn like_comment(
    like_service: web::Data<LikeSvc>,
    comment_id: web::Path<i64>,
    current_user: CurrentUser,
) -> Result<success::Success<LikeEntity>, error::Error> {
    like_target(&like_service, current_user.id, LikeableKind::Comment, comment_id.into_inner())
        .await
}

#[delete("/{comment_id:\\d+}/like")]
pub async fn unlike_comment(
    like_service: web::Data<LikeSvc>,
    comment_id: web::Path<i64>,
    current_user: CurrentUser,
) -> Result<success::Success<()>, error::Error> {
    unlike_target(&like_service, current_user.id, LikeableKind::Comment, comment_id.into_inner())
        .await
}

#[get("/{comment_id:\\d+}/like/status")]
pub async fn comment_like_status(
    like_service: web::Data<LikeSvc>,
    comment_id: web::Path<i64>,
    current_user: CurrentUser,
) -> Result<success::Success<LikeStatusResponse>, error::Error> {
    let status = like_service
        .status(current_user.id, LikeableKind::Comment, comment_id.into_inner())
        .await?;
    Ok(success::Success::ok(Some(status)))
}
