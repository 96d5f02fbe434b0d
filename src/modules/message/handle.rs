use actix_web::{get, patch, post, web};

use crate::{
    api::{error, success},
    middlewares::CurrentUser,
    modules::{
        message::{
            model::{ConversationResponse, MarkReadResponse, MessageQuery, SendMessageModel},
            repository_pg::MessageRepositoryPg,
            schema::MessageEntity,
            service::MessageService,
        },
        user::repository_pg::UserRepositoryPg,
    },
    utils::{ValidatedJson, ValidatedQuery},
};

pub type MessageSvc = MessageService<MessageRepositoryPg, UserRepositoryPg>;

#[get("")]
pub async fn list_messages(
    message_service: web::Data<MessageSvc>,
    current_user: CurrentUser,
    query: ValidatedQuery<MessageQuery>,
) -> Result<success::Success<Vec<MessageEntity>>, error::Error> {
    let messages = message_service.list(current_user.id, query.0.user_id).await?;
    Ok(success::Success::ok(Some(messages)))
}

#[post("")]
pub async fn send_message(
    message_service: web::Data<MessageSvc>,
    current_user: CurrentUser,
    body: ValidatedJson<SendMessageModel>,
) -> Result<success::Success<MessageEntity>, error::Error> {
    let SendMessageModel { recipient_id, content } = body.0;
    let message = message_service.send(current_user.id, recipient_id, &content).await?;
    Ok(success::Success::created(Some(message)))
}

#[get("/conversations")]
pub async fn list_conversations(
    message_service: web::Data<MessageSvc>,
    current_user: CurrentUser,
) -> Result<success::Success<Vec<ConversationResponse>>, error::Error> {
    let conversations = message_service.conversations(current_user.id).await?;
    Ok(success::Success::ok(Some(conversations)))
}

#[patch("/{user_id:\\d+}/read")]
pub async fn mark_read(
    message_service: web::Data<MessageSvc>,
    other_id: web::Path<i64>,
    current_user: CurrentUser,
) -> Result<success::Success<MarkReadResponse>, error::Error> {
    let updated = message_service.mark_read(current_user.id, other_id.into_inner()).await?;
    Ok(success::Success::ok(Some(MarkReadResponse { updated })))
}
