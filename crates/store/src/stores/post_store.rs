//! Post store.

use std::collections::HashMap;
use std::sync::Arc;

use chirp_common::{AppError, AppResult};
use tokio::sync::RwLock;

use crate::entities::Post;

#[derive(Default)]
struct Inner {
    /// Insertion-ordered arena. Posts are never deleted, so indices are
    /// stable and the order doubles as the feed tie-break.
    posts: Vec<Post>,
    /// Id -> arena index.
    by_id: HashMap<String, usize>,
}

/// Store for posts and their like-sets.
///
/// Like-toggling is a single check-then-write section under the store's
/// write guard: concurrent toggles for the same `(post, user)` pair
/// serialize, so membership flips exactly once per call.
#[derive(Clone, Default)]
pub struct PostStore {
    inner: Arc<RwLock<Inner>>,
}

impl PostStore {
    /// Create an empty post store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new post.
    pub async fn insert(&self, post: Post) -> Post {
        let mut inner = self.inner.write().await;
        let idx = inner.posts.len();
        inner.by_id.insert(post.id.clone(), idx);
        inner.posts.push(post.clone());
        post
    }

    /// Find a post by id.
    pub async fn find_by_id(&self, id: &str) -> Option<Post> {
        let inner = self.inner.read().await;
        inner.by_id.get(id).map(|&idx| inner.posts[idx].clone())
    }

    /// Get a post by id, failing if it does not exist.
    pub async fn get(&self, id: &str) -> AppResult<Post> {
        self.find_by_id(id)
            .await
            .ok_or_else(|| AppError::PostNotFound(id.to_string()))
    }

    /// Flip the given user's membership in the post's like-set.
    ///
    /// Returns the updated post.
    pub async fn toggle_like(&self, post_id: &str, user_id: &str) -> AppResult<Post> {
        let mut inner = self.inner.write().await;
        let idx = *inner
            .by_id
            .get(post_id)
            .ok_or_else(|| AppError::PostNotFound(post_id.to_string()))?;

        let post = &mut inner.posts[idx];
        if let Some(pos) = post.liker_ids.iter().position(|id| id == user_id) {
            post.liker_ids.remove(pos);
        } else {
            post.liker_ids.push(user_id.to_string());
        }

        Ok(post.clone())
    }

    /// All posts in insertion order.
    pub async fn all(&self) -> Vec<Post> {
        self.inner.read().await.posts.clone()
    }

    /// All posts authored by the given user, in insertion order.
    pub async fn by_author(&self, author_id: &str) -> Vec<Post> {
        let inner = self.inner.read().await;
        inner
            .posts
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect()
    }
}
