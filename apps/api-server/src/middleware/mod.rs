//! Middleware modules.

pub mod api_key;
pub mod error;
