//! In-memory data layer for chirp-rs.
//!
//! The service is a single-process, in-memory authority: there is no
//! database, no persistence, and no distributed coordination.
//! This crate owns the backing collections and hands out cheap `Clone`
//! store handles:
//!
//! - [`UserStore`]: user records, unique by username and email
//! - [`PostStore`]: posts and their like-sets
//! - [`CommentStore`]: comments, append-only
//! - [`FollowGraph`]: directed follow edges between users
//!
//! Every store serializes its mutations behind a single read-write guard,
//! so check-then-write sections (like toggles and uniqueness checks) are
//! atomic with respect to each other.

pub mod entities;
pub mod stores;

pub use stores::{CommentStore, FollowGraph, PostStore, UserStore};
