//! In-memory post repository - used when no database is configured and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::{NewPost, Post, PostChanges};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

struct Store {
    posts: HashMap<i64, Post>,
    last_id: i64,
}

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Reads share the lock, writes take it exclusively. Ids start at 1 and
/// are never reused.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                posts: HashMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        store.last_id += 1;
        let post = post.into_post(store.last_id);
        store.posts.insert(post.id, post.clone());

        tracing::debug!(post_id = post.id, "Post stored in memory");
        Ok(post)
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;

        let mut posts: Vec<Post> = store.posts.values().cloned().collect();
        posts.sort_by_key(|p| p.id);
        Ok(posts)
    }

    async fn find_by_id(&self, id: i64) -> Result<Post, RepoError> {
        let store = self.store.read().await;
        store.posts.get(&id).cloned().ok_or(RepoError::NotFound)
    }

    async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, RepoError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut store = self.store.write().await;
        let post = store.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        changes.apply_to(post);
        Ok(post.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(title: &str) -> NewPost {
        NewPost::new(title.to_string(), "content".to_string(), "Alice".to_string())
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryPostRepository::new();

        let first = repo.create(new_post("first")).await.unwrap();
        let second = repo.create(new_post("second")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.find_by_id(1).await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_find_all_sorted_by_id() {
        let repo = InMemoryPostRepository::new();
        for i in 0..20 {
            repo.create(new_post(&format!("post {i}"))).await.unwrap();
        }
        repo.delete(7).await.unwrap();

        let ids: Vec<i64> = repo.find_all().await.unwrap().iter().map(|p| p.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();

        assert_eq!(ids.len(), 19);
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn test_update_applies_present_fields() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(new_post("original")).await.unwrap();

        let updated = repo
            .update(
                post.id,
                PostChanges {
                    content: Some("new content".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "original");
        assert_eq!(updated.content, "new content");
        assert_eq!(updated.created_at, post.created_at);
        assert_eq!(repo.find_by_id(post.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_empty_update_reads_current_state() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(new_post("t")).await.unwrap();

        assert_eq!(
            repo.update(post.id, PostChanges::default()).await.unwrap(),
            post
        );
        assert!(matches!(
            repo.update(99, PostChanges::default()).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let changes = PostChanges {
            title: Some("x".into()),
            ..Default::default()
        };
        assert!(matches!(
            repo.update(1, changes).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(new_post("t")).await.unwrap();

        repo.delete(post.id).await.unwrap();
        assert!(matches!(repo.find_by_id(post.id).await, Err(RepoError::NotFound)));
        assert!(matches!(repo.delete(post.id).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = InMemoryPostRepository::new();
        let first = repo.create(new_post("a")).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let second = repo.create(new_post("b")).await.unwrap();
        assert_eq!(second.id, first.id + 1);
    }
}
