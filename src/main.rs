use actix_cors::Cors;
use actix_web::{
    self,
    middleware::{from_fn, Logger},
    web, App, HttpServer,
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{connect_database, AuthConfig, RedisCache},
    middlewares::authentication,
    modules::{
        buddy::{repository_pg::BuddyRequestRepositoryPg, service::BuddyService},
        comment::{repository_pg::CommentRepositoryPg, service::CommentService},
        like::{repository_pg::LikeRepositoryPg, service::LikeService},
        message::{repository_pg::MessageRepositoryPg, service::MessageService},
        post::{repository_pg::PostRepositoryPg, service::PostService},
        user::{repository_pg::UserRepositoryPg, service::UserService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check(db_pool: web::Data<sqlx::PgPool>) -> &'static str {
    match sqlx::query("SELECT 1").execute(db_pool.get_ref()).await {
        Ok(_) => "Server is running",
        Err(e) => {
            log::error!("Health check failed: {}", e);
            "Database unavailable"
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    let redis_pool =
        RedisCache::new().await.map_err(|_| std::io::Error::other("Redis connection error"))?;

    let user_repo = Arc::new(UserRepositoryPg::new(db_pool.clone()));
    let buddy_repo = Arc::new(BuddyRequestRepositoryPg::new(db_pool.clone()));
    let post_repo = Arc::new(PostRepositoryPg::new(db_pool.clone()));
    let comment_repo = Arc::new(CommentRepositoryPg::new(db_pool.clone()));
    let like_repo = Arc::new(LikeRepositoryPg::new(db_pool.clone()));
    let message_repo = Arc::new(MessageRepositoryPg::new(db_pool.clone()));

    let user_service = UserService::with_dependencies(
        user_repo.clone(),
        Arc::new(redis_pool.clone()),
        AuthConfig::from_env(),
    );
    let buddy_service = BuddyService::with_dependencies(buddy_repo, user_repo.clone());
    let post_service = PostService::with_dependencies(post_repo.clone());
    let comment_service = CommentService::with_dependencies(comment_repo.clone(), post_repo.clone());
    let like_service = LikeService::with_dependencies(like_repo, post_repo, comment_repo);
    let message_service = MessageService::with_dependencies(message_repo, user_repo);

    println!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&ENV.frontend_url)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(buddy_service.clone()))
            .app_data(web::Data::new(post_service.clone()))
            .app_data(web::Data::new(comment_service.clone()))
            .app_data(web::Data::new(like_service.clone()))
            .app_data(web::Data::new(message_service.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .service(health_check)
            .service(
                web::scope("/api/v1").configure(modules::user::route::public_api_configure).service(
                    web::scope("")
                        .wrap(from_fn(authentication))
                        .configure(modules::user::route::configure)
                        .configure(modules::buddy::route::configure)
                        .configure(modules::post::route::configure)
                        .configure(modules::like::route::configure)
                        .configure(modules::message::route::configure),
                ),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
