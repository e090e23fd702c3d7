//! Domain-level error types.

use thiserror::Error;

/// Input rejected by the post validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    TitleRequired,

    #[error("content is required")]
    ContentRequired,

    #[error("author is required")]
    AuthorRequired,

    #[error("no fields provided to update")]
    NoFieldsToUpdate,
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("post not found")]
    NotFound,

    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Domain errors - business logic failures.
///
/// Storage failures are carried through untouched so the HTTP layer can
/// decide how to report them.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl DomainError {
    /// True when the error means the post does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::Repository(RepoError::NotFound))
    }
}
