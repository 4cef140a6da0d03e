//! Post endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use chirp_common::AppResult;
use chirp_core::{CommentView, PostView};
use chirp_store::entities::{Comment, Post};
use serde::Deserialize;

use crate::{
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
};

/// Create post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
}

/// Create comment request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
}

/// The public feed. Viewer-relative fields honor an optional bearer token.
async fn list_posts(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PostView>>> {
    let viewer_id = viewer.as_ref().map(|u| u.id.as_str());
    let feed = state.post_service.feed(viewer_id).await?;
    Ok(Json(feed))
}

/// Create a new post.
async fn create_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> AppResult<Json<Post>> {
    let post = state.post_service.create(&user.id, &req.content).await?;
    Ok(Json(post))
}

/// Toggle the caller's like on a post.
///
/// POST and DELETE both land here: a single operation flips membership.
async fn toggle_like(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Post>> {
    let post = state.post_service.toggle_like(&id, &user.id).await?;
    Ok(Json(post))
}

/// Comments on a post, most recent first.
async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<CommentView>>> {
    let comments = state.post_service.comments(&id).await?;
    Ok(Json(comments))
}

/// Comment on a post.
async fn create_comment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> AppResult<Json<Comment>> {
    let comment = state
        .post_service
        .add_comment(&id, &user.id, &req.content)
        .await?;
    Ok(Json(comment))
}

/// Reshare another user's post.
async fn reshare_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Post>> {
    let post = state.post_service.reshare(&id, &user.id).await?;
    Ok(Json(post))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/{id}/like", post(toggle_like).delete(toggle_like))
        .route("/{id}/comments", get(list_comments).post(create_comment))
        .route("/{id}/reshare", post(reshare_post))
}
