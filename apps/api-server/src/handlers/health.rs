//! Health check endpoint.

use actix_web::HttpResponse;
use blog_shared::dto::HealthResponse;

/// GET /healthz
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    })
}
