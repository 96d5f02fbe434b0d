use crate::modules::comment::handle::*;
use actix_web::web::ServiceConfig;

/// Mounted inside the `/posts` scope.
pub fn post_scoped_configure(cfg: &mut ServiceConfig) {
    cfg.service(list_comments).service(create_comment);
}
