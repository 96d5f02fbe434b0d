use crate::modules::buddy::handle::*;
use actix_web::web::{scope, ServiceConfig};

/// Routes addressed at another user, mounted inside the `/users` scope.
pub fn user_scoped_configure(cfg: &mut ServiceConfig) {
    cfg.service(send_buddy_request).service(relationship_status);
}

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/buddy_requests")
            .service(list_buddy_requests)
            .service(accept_buddy_request)
            .service(decline_buddy_request)
            .service(remove_buddy_request),
    )
    .service(scope("/buddies").service(list_buddies));
}
