//! Follow graph store.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::entities::FollowEdge;

/// Directed follow-edge set.
///
/// Edges are unique per ordered `(follower, target)` pair. The only
/// mutation is [`toggle`](Self::toggle), which flips edge presence under
/// the write guard: concurrent toggles for the same pair serialize, so the
/// edge cannot be double-inserted or double-removed.
#[derive(Clone, Default)]
pub struct FollowGraph {
    edges: Arc<RwLock<HashSet<FollowEdge>>>,
}

impl FollowGraph {
    /// Create an empty follow graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the edge from `follower_id` to `target_id`.
    ///
    /// Returns `true` when the edge now exists (follow), `false` when it
    /// was removed (unfollow).
    pub async fn toggle(&self, follower_id: &str, target_id: &str) -> bool {
        let edge = FollowEdge {
            follower_id: follower_id.to_string(),
            target_id: target_id.to_string(),
        };

        let mut edges = self.edges.write().await;
        if edges.remove(&edge) {
            false
        } else {
            edges.insert(edge);
            true
        }
    }

    /// Whether `follower_id` currently follows `target_id`.
    pub async fn is_following(&self, follower_id: &str, target_id: &str) -> bool {
        let edge = FollowEdge {
            follower_id: follower_id.to_string(),
            target_id: target_id.to_string(),
        };
        self.edges.read().await.contains(&edge)
    }

    /// Ids of users following `target_id`.
    pub async fn followers(&self, target_id: &str) -> HashSet<String> {
        self.edges
            .read()
            .await
            .iter()
            .filter(|e| e.target_id == target_id)
            .map(|e| e.follower_id.clone())
            .collect()
    }

    /// Ids of users `follower_id` follows.
    pub async fn following(&self, follower_id: &str) -> HashSet<String> {
        self.edges
            .read()
            .await
            .iter()
            .filter(|e| e.follower_id == follower_id)
            .map(|e| e.target_id.clone())
            .collect()
    }
}
