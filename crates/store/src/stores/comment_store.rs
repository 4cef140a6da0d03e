//! Comment store.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::entities::Comment;

/// Append-only store for comments.
#[derive(Clone, Default)]
pub struct CommentStore {
    comments: Arc<RwLock<Vec<Comment>>>,
}

impl CommentStore {
    /// Create an empty comment store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new comment.
    pub async fn insert(&self, comment: Comment) -> Comment {
        self.comments.write().await.push(comment.clone());
        comment
    }

    /// All comments on the given post, in insertion order.
    pub async fn for_post(&self, post_id: &str) -> Vec<Comment> {
        self.comments
            .read()
            .await
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect()
    }

    /// Number of comments on the given post.
    ///
    /// Computed from the backing collection on every call; the count is
    /// never stored where it could drift out of sync.
    pub async fn count_for_post(&self, post_id: &str) -> usize {
        self.comments
            .read()
            .await
            .iter()
            .filter(|c| c.post_id == post_id)
            .count()
    }
}
