//! HTTP API layer for chirp-rs.
//!
//! This crate provides the REST surface over the core services:
//!
//! - **Endpoints**: auth, posts and users routers
//! - **Extractors**: required and optional authenticated-user extractors
//! - **Middleware**: bearer-token resolution into request extensions
//! - **Tokens**: JWT issuance and verification
//!
//! Built on Axum 0.8. The core never sees a token: this layer resolves
//! bearer tokens to [`chirp_store::entities::User`] values and hands those
//! down.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod token;

pub use endpoints::router;
pub use middleware::AppState;
pub use token::TokenSigner;
