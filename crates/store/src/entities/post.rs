//! Post entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A content item authored by a user; either an original or a reshare.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,

    /// The authoring user.
    pub author_id: String,

    /// Opaque text payload. Non-empty for originals; reshares copy the
    /// original's content verbatim.
    pub content: String,

    pub created_at: DateTime<Utc>,

    /// Users who currently like this post. Set semantics (no duplicates),
    /// kept in like order for deterministic output. A reshare's likers are
    /// independent of the original's.
    pub liker_ids: Vec<String>,

    /// When present, this post is a reshare of the referenced post.
    /// Chains are permitted: the original may itself be a reshare.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_post_id: Option<String>,
}

impl Post {
    /// Whether this post is a reshare of another post.
    #[must_use]
    pub const fn is_reshare(&self) -> bool {
        self.original_post_id.is_some()
    }

    /// Whether the given user currently likes this post.
    #[must_use]
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.liker_ids.iter().any(|id| id == user_id)
    }
}
