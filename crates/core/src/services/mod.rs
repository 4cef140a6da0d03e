//! Business logic services.

pub mod following;
pub mod post;
pub mod profile;
pub mod user;

pub use following::{FollowState, FollowingService};
pub use post::{CommentView, PostService, PostView};
pub use profile::{Profile, ProfileService};
pub use user::{CreateUserInput, UserService, UserView};
