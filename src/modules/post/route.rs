use crate::modules::{comment, like, post::handle::*};
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/posts")
            .service(list_posts)
            .service(create_post)
            .service(update_post)
            .service(delete_post)
            .configure(comment::route::post_scoped_configure)
            .configure(like::route::post_scoped_configure),
    );
}
