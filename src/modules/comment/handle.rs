use actix_web::{get, post, web};

use crate::{
    api::{error, success},
    middlewares::CurrentUser,
    modules::{
        comment::{
            model::{CommentResponse, CreateCommentModel},
            repository_pg::CommentRepositoryPg,
            service::CommentService,
        },
        post::repository_pg::PostRepositoryPg,
    },
    utils::ValidatedJson,
};

pub type CommentSvc = CommentService<CommentRepositoryPg, PostRepositoryPg>;

#[get("/{post_id:\\d+}/comments")]
pub async fn list_comments(
    comment_service: web::Data<CommentSvc>,
    post_id: web::Path<i64>,
) -> Result<success::Success<Vec<CommentResponse>>, error::Error> {
    let comments = comment_service.list(post_id.into_inner()).await?;
    Ok(success::Success::ok(Some(comments)))
}

#[post("/{post_id:\\d+}/comments")]
pub async fn create_comment(
    comment_service: web::Data<CommentSvc>,
    post_id: web::Path<i64>,
    current_user: CurrentUser,
    body: ValidatedJson<CreateCommentModel>,
) -> Result<success::Success<CommentResponse>, error::Error> {
    let comment =
        comment_service.create(current_user.id, post_id.into_inner(), &body.0.content).await?;
    Ok(success::Success::created(Some(comment)).message("Comment added"))
}
