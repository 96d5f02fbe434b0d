use actix_web::{delete, get, patch, post, web};

use crate::{
    api::{error, success},
    middlewares::CurrentUser,
    modules::{
        buddy::{
            model::{
                BuddyRequestResponse, PendingRequests, RelationshipResponse, SendOutcome,
            },
            repository_pg::BuddyRequestRepositoryPg,
            service::BuddyService,
        },
        user::{model::UserSummary, repository_pg::UserRepositoryPg},
    },
};

pub type BuddySvc = BuddyService<BuddyRequestRepositoryPg, UserRepositoryPg>;

#[post("/{user_id:\\d+}/buddy_requests")]
pub async fn send_buddy_request(
    buddy_service: web::Data<BuddySvc>,
    receiver_id: web::Path<i64>,
    current_user: CurrentUser,
) -> Result<success::Success<BuddyRequestResponse>, error::Error> {
    let outcome = buddy_service.send_request(current_user.id, receiver_id.into_inner()).await?;

    Ok(match outcome {
        SendOutcome::Created(request) => {
            success::Success::created(Some(request)).message("Buddy request sent successfully")
        }
        SendOutcome::AutoAccepted(request) => {
            let message = format!(
                "Buddy request from {} was automatically accepted",
                request.user.first_name
            );
            success::Success::ok(Some(request)).message(message)
        }
    })
}

#[get("/{user_id:\\d+}/relationship")]
pub async fn relationship_status(
    buddy_service: web::Data<BuddySvc>,
    other_id: web::Path<i64>,
    current_user: CurrentUser,
) -> Result<success::Success<RelationshipResponse>, error::Error> {
    let other_id = other_id.into_inner();
    let status = buddy_service.relationship_status(current_user.id, other_id).await?;

    Ok(success::Success::ok(Some(RelationshipResponse { user_id: other_id, status })))
}

#[get("")]
pub async fn list_buddy_requests(
    buddy_service: web::Data<BuddySvc>,
    current_user: CurrentUser,
) -> Result<success::Success<PendingRequests>, error::Error> {
    let requests = buddy_service.list_for_user(current_user.id).await?;
    Ok(success::Success::ok(Some(requests)).message("Buddy requests retrieved successfully"))
}

#[patch("/{request_id}/accept")]
pub async fn accept_buddy_request(
    buddy_service: web::Data<BuddySvc>,
    request_id: web::Path<i64>,
    current_user: CurrentUser,
) -> Result<success::Success<BuddyRequestResponse>, error::Error> {
    let request = buddy_service.accept(request_id.into_inner(), current_user.id).await?;
    Ok(success::Success::ok(Some(request)).message("Buddy request accepted"))
}

#[patch("/{request_id}/decline")]
pub async fn decline_buddy_request(
    buddy_service: web::Data<BuddySvc>,
    request_id: web::Path<i64>,
    current_user: CurrentUser,
) -> Result<success::Success<BuddyRequestResponse>, error::Error> {
    let request = buddy_service.decline(request_id.into_inner(), current_user.id).await?;
    Ok(success::Success::ok(Some(request)).message("Buddy request declined"))
}

#[delete("/{request_id}")]
pub async fn remove_buddy_request(
    buddy_service: web::Data<BuddySvc>,
    request_id: web::Path<i64>,
    current_user: CurrentUser,
) -> Result<success::Success<()>, error::Error> {
    buddy_service.remove(request_id.into_inner(), current_user.id).await?;
    Ok(success::Success::ok(None).message("Buddy request was removed"))
}

#[get("")]
pub async fn list_buddies(
    buddy_service: web::Data<BuddySvc>,
    current_user: CurrentUser,
) -> Result<success::Success<Vec<UserSummary>>, error::Error> {
    let buddies = buddy_service.list_buddies(current_user.id).await?;
    Ok(success::Success::ok(Some(buddies)).message("Buddies retrieved successfully"))
}
