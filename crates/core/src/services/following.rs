//! Following service.

use chirp_common::{AppError, AppResult};
use chirp_store::{FollowGraph, UserStore, entities::User};

use crate::services::user::UserView;

/// Resulting state of a follow toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowState {
    /// The follower is now following the target.
    Following,
    /// The edge was removed; the follower no longer follows the target.
    NotFollowing,
}

impl FollowState {
    /// Whether the edge exists after the toggle.
    #[must_use]
    pub const fn is_following(self) -> bool {
        matches!(self, Self::Following)
    }
}

/// Following service for the social graph.
///
/// Follow and unfollow are one operation: a single [`toggle`](Self::toggle)
/// call flips the edge and reports the resulting state. There are no
/// separate follow/unfollow verbs.
#[derive(Clone)]
pub struct FollowingService {
    follow_graph: FollowGraph,
    user_store: UserStore,
}

impl FollowingService {
    /// Create a new following service.
    #[must_use]
    pub fn new(follow_graph: FollowGraph, user_store: UserStore) -> Self {
        Self {
            follow_graph,
            user_store,
        }
    }

    /// Flip the follow edge from `follower_id` to `target_id`.
    ///
    /// Rejects self-follows and unknown targets; a rejected call leaves
    /// the graph untouched.
    pub async fn toggle(&self, follower_id: &str, target_id: &str) -> AppResult<FollowState> {
        if follower_id == target_id {
            return Err(AppError::Validation("Cannot follow yourself".to_string()));
        }
        if !self.user_store.contains(target_id).await {
            return Err(AppError::UserNotFound(target_id.to_string()));
        }

        let state = if self.follow_graph.toggle(follower_id, target_id).await {
            FollowState::Following
        } else {
            FollowState::NotFollowing
        };

        tracing::debug!(
            follower_id = %follower_id,
            target_id = %target_id,
            following = state.is_following(),
            "Toggled follow edge"
        );

        Ok(state)
    }

    /// Whether `follower_id` currently follows `target_id`.
    pub async fn is_following(&self, follower_id: &str, target_id: &str) -> bool {
        self.follow_graph.is_following(follower_id, target_id).await
    }

    /// Users following `target_id`, in registration order.
    pub async fn followers(&self, target_id: &str) -> AppResult<Vec<UserView>> {
        if !self.user_store.contains(target_id).await {
            return Err(AppError::UserNotFound(target_id.to_string()));
        }

        let follower_ids = self.follow_graph.followers(target_id).await;
        let followers = self
            .user_store
            .all()
            .await
            .iter()
            .filter(|u| follower_ids.contains(&u.id))
            .map(UserView::from)
            .collect();

        Ok(followers)
    }

    /// Ids of users `follower_id` follows, sorted for stable output.
    pub async fn following_ids(&self, follower_id: &str) -> AppResult<Vec<String>> {
        if !self.user_store.contains(follower_id).await {
            return Err(AppError::UserNotFound(follower_id.to_string()));
        }

        let mut ids: Vec<String> = self
            .follow_graph
            .following(follower_id)
            .await
            .into_iter()
            .collect();
        ids.sort_unstable();

        Ok(ids)
    }
}
