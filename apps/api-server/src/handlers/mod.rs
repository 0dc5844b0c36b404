//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Posts nested under their messageboard and topic
            .service(
                web::scope("/messageboards/{board}/topics/{topic}/posts")
                    .route("", web::get().to(posts::index))
                    .route("", web::post().to(posts::create))
                    .route("/new", web::get().to(posts::new))
                    .route("/{id}/edit", web::get().to(posts::edit)),
            )
            // Post member routes
            .service(
                web::scope("/posts/{id}")
                    .route("", web::put().to(posts::update))
                    .route("", web::delete().to(posts::destroy))
                    .route("/read", web::post().to(posts::mark_as_read))
                    .route("/unread", web::post().to(posts::mark_as_unread))
                    .route("/quote", web::get().to(posts::quote))
                    .route("/like", web::post().to(posts::like))
                    .route("/dislike", web::post().to(posts::dislike)),
            ),
    );
}
