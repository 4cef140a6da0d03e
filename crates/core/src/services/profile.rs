//! Profile aggregation service.

use chirp_common::{AppError, AppResult};
use chirp_store::{FollowGraph, PostStore, UserStore, entities::Post};
use serde::Serialize;

use crate::services::user::UserView;

/// A user's profile: the user, their posts and their graph counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user: UserView,

    /// Posts authored by the user, most recent first.
    pub posts: Vec<Post>,

    pub posts_count: usize,
    pub followers_count: usize,
    pub following_count: usize,
}

/// Composes the identity store, post store and follow graph into a single
/// profile view. Every count is the cardinality of its backing collection,
/// computed fresh on each call — nothing is cached across calls.
#[derive(Clone)]
pub struct ProfileService {
    user_store: UserStore,
    post_store: PostStore,
    follow_graph: FollowGraph,
}

impl ProfileService {
    /// Create a new profile service.
    #[must_use]
    pub fn new(user_store: UserStore, post_store: PostStore, follow_graph: FollowGraph) -> Self {
        Self {
            user_store,
            post_store,
            follow_graph,
        }
    }

    /// Get the profile for a user.
    pub async fn get_profile(&self, user_id: &str) -> AppResult<Profile> {
        let user = self
            .user_store
            .find_by_id(user_id)
            .await
            .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))?;

        let mut posts = self.post_store.by_author(user_id).await;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let followers_count = self.follow_graph.followers(user_id).await.len();
        let following_count = self.follow_graph.following(user_id).await.len();

        Ok(Profile {
            user: UserView::from(user),
            posts_count: posts.len(),
            followers_count,
            following_count,
            posts,
        })
    }
}
