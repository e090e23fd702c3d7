//! Post service - validation rules in front of the repository.

use std::sync::Arc;

use crate::domain::{NewPost, Post, PostChanges};
use crate::error::{DomainError, ValidationError};
use crate::ports::PostRepository;

/// Validates post input and delegates persistence to a [`PostRepository`].
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Create a post. Fields are trimmed and checked title, content, author.
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        author: &str,
    ) -> Result<Post, DomainError> {
        let title = required(title, ValidationError::TitleRequired)?;
        let content = required(content, ValidationError::ContentRequired)?;
        let author = required(author, ValidationError::AuthorRequired)?;

        let post = NewPost::new(title, content, author);
        Ok(self.repo.create(post).await?)
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Post, DomainError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    /// Update the present fields of a post.
    ///
    /// Present fields are trimmed and must stay non-empty. At least one field
    /// must be present; otherwise the repository is never touched.
    pub async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, DomainError> {
        let changes = PostChanges {
            title: optional(changes.title, ValidationError::TitleRequired)?,
            content: optional(changes.content, ValidationError::ContentRequired)?,
            author: optional(changes.author, ValidationError::AuthorRequired)?,
        };

        if changes.is_empty() {
            return Err(ValidationError::NoFieldsToUpdate.into());
        }

        Ok(self.repo.update(id, changes).await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        Ok(self.repo.delete(id).await?)
    }
}

fn required(value: &str, err: ValidationError) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(err);
    }
    Ok(trimmed.to_string())
}

fn optional(
    value: Option<String>,
    err: ValidationError,
) -> Result<Option<String>, ValidationError> {
    value.map(|v| required(&v, err)).transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::RepoError;

    /// Repository double that counts every call it receives.
    #[derive(Default)]
    struct RecordingRepository {
        posts: Mutex<BTreeMap<i64, Post>>,
        calls: AtomicUsize,
    }

    impl RecordingRepository {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn len(&self) -> usize {
            self.posts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PostRepository for RecordingRepository {
        async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut posts = self.posts.lock().unwrap();
            let id = posts.keys().next_back().copied().unwrap_or(0) + 1;
            let post = post.into_post(id);
            posts.insert(id, post.clone());
            Ok(post)
        }

        async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.posts.lock().unwrap().values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Post, RepoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.posts
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or(RepoError::NotFound)
        }

        async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, RepoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut posts = self.posts.lock().unwrap();
            let post = posts.get_mut(&id).ok_or(RepoError::NotFound)?;
            changes.apply_to(post);
            Ok(post.clone())
        }

        async fn delete(&self, id: i64) -> Result<(), RepoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.posts
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or(RepoError::NotFound)
        }
    }

    fn service() -> (PostService, Arc<RecordingRepository>) {
        let repo = Arc::new(RecordingRepository::default());
        (PostService::new(repo.clone()), repo)
    }

    fn validation(err: DomainError) -> ValidationError {
        match err {
            DomainError::Validation(v) => v,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_trims_and_stores() {
        let (service, _) = service();

        let created = service
            .create("  Hello  ", "\tbody\n", " Alice ")
            .await
            .unwrap();

        assert!(created.id > 0);
        assert_eq!(created.title, "Hello");
        assert_eq!(created.content, "body");
        assert_eq!(created.author, "Alice");
        assert!(created.created_at.timestamp() > 0);

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_requires_each_field() {
        let (service, repo) = service();

        let cases = [
            (("", "c", "a"), ValidationError::TitleRequired),
            (("t", "", "a"), ValidationError::ContentRequired),
            (("t", "c", ""), ValidationError::AuthorRequired),
            (("   ", "c", "a"), ValidationError::TitleRequired),
        ];

        for ((title, content, author), expected) in cases {
            let err = service.create(title, content, author).await.unwrap_err();
            assert_eq!(validation(err), expected);
        }

        assert_eq!(repo.calls(), 0);
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_create_reports_first_invalid_field() {
        let (service, _) = service();

        let err = service.create(" ", " ", " ").await.unwrap_err();
        assert_eq!(validation(err), ValidationError::TitleRequired);

        let err = service.create("t", " ", " ").await.unwrap_err();
        assert_eq!(validation(err), ValidationError::ContentRequired);
    }

    #[tokio::test]
    async fn test_update_without_fields_skips_storage() {
        let (service, repo) = service();
        let post = service.create("t", "c", "a").await.unwrap();
        let before = repo.calls();

        let err = service
            .update(post.id, PostChanges::default())
            .await
            .unwrap_err();

        assert_eq!(validation(err), ValidationError::NoFieldsToUpdate);
        assert_eq!(repo.calls(), before);
    }

    #[tokio::test]
    async fn test_update_rejects_blank_present_field() {
        let (service, repo) = service();
        let post = service.create("t", "c", "a").await.unwrap();
        let before = repo.calls();

        let err = service
            .update(
                post.id,
                PostChanges {
                    title: Some("".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(validation(err), ValidationError::TitleRequired);

        let err = service
            .update(
                post.id,
                PostChanges {
                    content: Some("ok".into()),
                    author: Some("  ".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(validation(err), ValidationError::AuthorRequired);

        assert_eq!(repo.calls(), before);
    }

    #[tokio::test]
    async fn test_partial_update_changes_only_given_fields() {
        let (service, _) = service();
        let post = service.create("original", "content", "Alice").await.unwrap();

        let updated = service
            .update(
                post.id,
                PostChanges {
                    title: Some("  updated title ".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "updated title");
        assert_eq!(updated.content, "content");
        assert_eq!(updated.author, "Alice");
        assert_eq!(updated.created_at, post.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let (service, _) = service();

        let err = service
            .update(
                42,
                PostChanges {
                    title: Some("x".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let (service, _) = service();
        let post = service.create("t", "c", "a").await.unwrap();

        service.delete(post.id).await.unwrap();
        assert!(service.get(post.id).await.unwrap_err().is_not_found());
        assert!(service.delete(post.id).await.unwrap_err().is_not_found());
    }
}
