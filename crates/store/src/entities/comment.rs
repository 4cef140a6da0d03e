//! Comment entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a post. Immutable once created; never deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,

    /// The post this comment belongs to.
    pub post_id: String,

    /// The commenting user.
    pub author_id: String,

    pub content: String,

    pub created_at: DateTime<Utc>,
}
