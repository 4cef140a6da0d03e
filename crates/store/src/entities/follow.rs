//! Follow edge entity.

/// A directed follow relationship: `follower_id` is subscribed to
/// `target_id`'s posts. Unique per ordered pair; self-edges are rejected
/// at the service boundary and never persist.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FollowEdge {
    /// The user who is following.
    pub follower_id: String,

    /// The user being followed.
    pub target_id: String,
}
