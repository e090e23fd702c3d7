//! Shared-secret guard for mutating and admin routes.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};
use subtle::ConstantTimeEq;

use crate::middleware::error::AppError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Proof that the request passed the API key check.
///
/// Put it first in a handler's arguments so the check runs before the body
/// is read:
/// ```ignore
/// async fn delete_post(_guard: ApiKeyGuard, path: web::Path<String>) -> AppResult<HttpResponse>
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyGuard {
    /// The request carried a non-empty key header.
    pub key_present: bool,
}

/// Compare the provided header against the configured key. No configured key
/// lets every request through.
fn verify(expected: Option<&str>, provided: Option<&[u8]>) -> Result<(), AppError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    match provided {
        Some(provided) if bool::from(expected.as_bytes().ct_eq(provided)) => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

impl FromRequest for ApiKeyGuard {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(AppError::Internal(
                "application state missing".to_string(),
            )));
        };

        let provided = req
            .headers()
            .get(API_KEY_HEADER)
            .map(|value| value.as_bytes());

        let result = verify(state.api_key.as_deref(), provided).map(|()| ApiKeyGuard {
            key_present: provided.is_some_and(|p| !p.is_empty()),
        });

        if result.is_err() {
            tracing::debug!(path = %req.path(), "Rejected request with missing or wrong API key");
        }

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_configured_key_allows_all() {
        assert!(verify(None, None).is_ok());
        assert!(verify(None, Some(b"anything")).is_ok());
    }

    #[test]
    fn test_key_must_match_exactly() {
        assert!(verify(Some("secret"), Some(b"secret")).is_ok());
        assert!(verify(Some("secret"), Some(b"Secret")).is_err());
        assert!(verify(Some("secret"), Some(b"secret ")).is_err());
        assert!(verify(Some("secret"), Some(b"")).is_err());
        assert!(verify(Some("secret"), None).is_err());
    }
}
