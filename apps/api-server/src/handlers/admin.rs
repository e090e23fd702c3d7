//! Runtime log level administration.

use actix_web::{HttpRequest, HttpResponse, http::header, web};

use blog_shared::dto::{LogLevelRequest, LogLevelResponse};

use crate::middleware::api_key::ApiKeyGuard;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::telemetry::level_name;

/// GET /admin/log-level
pub async fn get_log_level(
    _guard: ApiKeyGuard,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let level = state.log_level.current()?;

    Ok(HttpResponse::Ok().json(LogLevelResponse {
        level: level_name(level),
    }))
}

/// PUT /admin/log-level
pub async fn update_log_level(
    guard: ApiKeyGuard,
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<LogLevelRequest>,
) -> AppResult<HttpResponse> {
    let requested = body.into_inner().level;
    if requested.trim().is_empty() {
        return Err(AppError::BadRequest("level is required".to_string()));
    }

    let old_level = state.log_level.current()?;
    let new_level = state.log_level.set(&requested)?;

    let conn = req.connection_info();
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    tracing::info!(
        old_level = %level_name(old_level),
        new_level = %level_name(new_level),
        requested_level = %requested,
        client_ip = conn.realip_remote_addr().unwrap_or("unknown"),
        api_key_present = guard.key_present,
        user_agent,
        "Log level updated"
    );

    Ok(HttpResponse::Ok().json(LogLevelResponse {
        level: level_name(new_level),
    }))
}
