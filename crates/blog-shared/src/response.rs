//! Error body returned by every failing endpoint.

use serde::{Deserialize, Serialize};

/// `{"error": "<message>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    // Common error constructors
    pub fn unauthorized() -> Self {
        Self::new("unauthorized")
    }

    pub fn internal_error() -> Self {
        Self::new("internal server error")
    }
}
