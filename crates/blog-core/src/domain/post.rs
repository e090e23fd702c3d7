use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - represents a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// A validated post that has not been stored yet.
///
/// Storage assigns the `id` when the post is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    /// Create a new post stamped with the current UTC time.
    pub fn new(title: String, content: String, author: String) -> Self {
        Self {
            title,
            content,
            author,
            created_at: Utc::now(),
        }
    }

    /// Attach the storage-assigned id.
    pub fn into_post(self, id: i64) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            author: self.author,
            created_at: self.created_at,
        }
    }
}

/// Partial update of a post. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

impl PostChanges {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none()
    }

    /// Apply the present fields to `post` in place.
    pub fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(author) = self.author {
            post.author = author;
        }
    }
}
