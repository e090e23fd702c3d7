use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges};
use crate::error::RepoError;

/// Post repository - abstraction over post storage (SQL, in-memory).
///
/// The repository owns the canonical copy of every post; callers only ever
/// receive clones.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post and return it with its assigned id.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// All posts, ascending by id.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its id. Fails with `RepoError::NotFound` if absent.
    async fn find_by_id(&self, id: i64) -> Result<Post, RepoError>;

    /// Apply the present fields of `changes` and return the updated post.
    ///
    /// An empty changeset performs no write and returns the current state.
    async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, RepoError>;

    /// Delete a post by its id. Fails with `RepoError::NotFound` if absent.
    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}
