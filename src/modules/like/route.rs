use crate::modules::like::handle::*;
use actix_web::web::{scope, ServiceConfig};

/// Mounted inside the `/posts` scope.
pub fn post_scoped_configure(cfg: &mut ServiceConfig) {
    cfg.service(like_post).service(unlike_post).service(post_like_status);
}

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/comments")
            .service(like_comment)
            .service(unlike_comment)
            .service(comment_like_status),
    );
}
