//! # Blog Shared
//!
//! Request and response types shared by the HTTP API and its clients.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
