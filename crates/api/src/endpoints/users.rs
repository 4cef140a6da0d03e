//! User endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use chirp_common::AppResult;
use chirp_core::{Profile, UserView};
use serde::Serialize;

use crate::{extractors::AuthUser, middleware::AppState};

/// Follow toggle response: the resulting edge state.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowResponse {
    pub following: bool,
}

/// Following-ids response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowingResponse {
    pub following_ids: Vec<String>,
}

/// Directory of all users.
async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserView>>> {
    Ok(Json(state.user_service.list().await))
}

/// A user's profile aggregate.
async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Profile>> {
    let profile = state.profile_service.get_profile(&id).await?;
    Ok(Json(profile))
}

/// Toggle the caller's follow edge to a user.
///
/// POST and DELETE both land here: a single operation flips the edge and
/// returns the resulting state.
async fn toggle_follow(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<FollowResponse>> {
    let state_after = state.following_service.toggle(&user.id, &id).await?;
    Ok(Json(FollowResponse {
        following: state_after.is_following(),
    }))
}

/// Ids of users the given user follows.
async fn get_following(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<FollowingResponse>> {
    let following_ids = state.following_service.following_ids(&id).await?;
    Ok(Json(FollowingResponse { following_ids }))
}

/// Users following the given user.
async fn get_followers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<UserView>>> {
    let followers = state.following_service.followers(&id).await?;
    Ok(Json(followers))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/{id}", get(get_profile))
        .route("/{id}/follow", post(toggle_follow).delete(toggle_follow))
        .route("/{id}/following", get(get_following))
        .route("/{id}/followers", get(get_followers))
}
