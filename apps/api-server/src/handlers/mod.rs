//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::{json_error_handler, query_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    // Public routes
                    .route("", web::get().to(posts::list_public))
                    .route("", web::post().to(posts::submit))
                    .route("/stats/public", web::get().to(posts::public_stats))
                    // Moderator routes
                    .route("/moderation", web::get().to(posts::list_for_moderation))
                    .route("/moderation/stats", web::get().to(posts::moderation_stats))
                    .route("/{id}/moderate", web::put().to(posts::moderate)),
            ),
    );
}
