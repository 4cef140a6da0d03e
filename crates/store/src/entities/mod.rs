//! Entity models.

pub mod comment;
pub mod follow;
pub mod post;
pub mod user;

pub use comment::Comment;
pub use follow::FollowEdge;
pub use post::Post;
pub use user::User;
