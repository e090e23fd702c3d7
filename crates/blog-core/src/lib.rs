//! # Blog Core
//!
//! The domain layer of the blog service.
//! This crate contains the post entity, the storage port and the validation
//! rules, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError, ValidationError};
pub use service::PostService;
