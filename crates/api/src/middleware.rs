//! API middleware.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use chirp_core::{FollowingService, PostService, ProfileService, UserService};

use crate::token::TokenSigner;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// Registration, authentication and lookup.
    pub user_service: UserService,
    /// Follow graph operations.
    pub following_service: FollowingService,
    /// Posts, likes, reshares and comments.
    pub post_service: PostService,
    /// Profile aggregation.
    pub profile_service: ProfileService,
    /// Token issuance and verification.
    pub tokens: TokenSigner,
}

/// Authentication middleware.
///
/// Resolves a `Bearer` token to a user and stashes it in the request
/// extensions. Requests without a valid token pass through untouched;
/// handlers that require identity reject via [`crate::extractors::AuthUser`].
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(claims) = state.tokens.verify(token)
        && let Some(user) = state.user_service.find_by_id(&claims.sub).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
