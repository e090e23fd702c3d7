//! HTTP handlers and route configuration.

mod admin;
mod docs;
mod health;
mod posts;


use actix_web::{HttpResponse, error::InternalError, web};
use blog_shared::ErrorResponse;

/// Malformed or mistyped JSON bodies become `400 {"error": ...}`.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorResponse::new(err.to_string());
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        // Public routes
        .route("/healthz", web::get().to(health::health_check))
        .route("/openapi.yaml", web::get().to(docs::openapi_yaml))
        .route("/docs/swagger", web::get().to(docs::swagger_ui))
        .route("/docs/redoc", web::get().to(docs::redoc))
        // Reads are public, writes check the API key
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::list_posts))
                .route("", web::post().to(posts::create_post))
                .route("/{id}", web::get().to(posts::get_post))
                .route("/{id}", web::patch().to(posts::update_post))
                .route("/{id}", web::delete().to(posts::delete_post)),
        )
        .service(
            web::scope("/admin")
                .route("/log-level", web::get().to(admin::get_log_level))
                .route("/log-level", web::put().to(admin::update_log_level)),
        );
}
