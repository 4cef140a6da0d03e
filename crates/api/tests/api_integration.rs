//! API integration tests.
//!
//! These tests drive the full router — middleware, extractors, handlers
//! and the in-memory stores — through `tower::ServiceExt::oneshot`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chirp_api::{AppState, TokenSigner, middleware::auth_middleware, router};
use chirp_core::{FollowingService, PostService, ProfileService, UserService};
use chirp_store::{CommentStore, FollowGraph, PostStore, UserStore};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Build a fresh application with empty stores.
fn test_app() -> Router {
    let user_store = UserStore::new();
    let post_store = PostStore::new();
    let comment_store = CommentStore::new();
    let follow_graph = FollowGraph::new();

    let state = AppState {
        user_service: UserService::new(user_store.clone()),
        following_service: FollowingService::new(follow_graph.clone(), user_store.clone()),
        post_service: PostService::new(
            post_store.clone(),
            comment_store,
            user_store.clone(),
            follow_graph.clone(),
        ),
        profile_service: ProfileService::new(user_store, post_store, follow_graph),
        tokens: TokenSigner::new("integration-test-secret", 3600),
    };

    router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

/// Register a user and return `(user_id, token)`.
async fn register(app: &Router, name: &str, username: &str, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": name,
            "username": username,
            "email": email,
            "password": "correct horse battery",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    (
        body["user"]["id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn test_register_returns_user_and_token_without_hash() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": "Alice",
            "username": "alice",
            "email": "alice@example.com",
            "password": "correct horse battery",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn test_register_validates_and_conflicts() {
    let app = test_app();
    register(&app, "Alice", "alice", "alice@example.com").await;

    // Empty name
    let (status, _) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": "",
            "username": "someone",
            "email": "someone@example.com",
            "password": "correct horse battery",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Duplicate username
    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": "Impostor",
            "username": "alice",
            "email": "impostor@example.com",
            "password": "correct horse battery",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_login_issues_usable_token() {
    let app = test_app();
    register(&app, "Alice", "alice", "alice@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({
            "email": "alice@example.com",
            "password": "correct horse battery",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    // The login token authenticates a write.
    let (status, _) = send(
        &app,
        "POST",
        "/posts",
        Some(&token),
        Some(json!({"content": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = test_app();
    register(&app, "Alice", "alice", "alice@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({
            "email": "alice@example.com",
            "password": "wrong-password",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_posting_requires_identity() {
    let app = test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/posts",
        None,
        Some(json!({"content": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "POST",
        "/posts",
        Some("garbage-token"),
        Some(json!({"content": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_feed_is_public_and_newest_first() {
    let app = test_app();
    let (_, token) = register(&app, "Alice", "alice", "alice@example.com").await;

    send(
        &app,
        "POST",
        "/posts",
        Some(&token),
        Some(json!({"content": "first"})),
    )
    .await;
    send(
        &app,
        "POST",
        "/posts",
        Some(&token),
        Some(json!({"content": "second"})),
    )
    .await;

    let (status, body) = send(&app, "GET", "/posts", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let feed = body.as_array().unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0]["content"], "second");
    assert_eq!(feed[1]["content"], "first");
    assert_eq!(feed[0]["user"]["username"], "alice");
    assert_eq!(feed[0]["likedByMe"], false);
}

#[tokio::test]
async fn test_like_toggle_via_post_and_delete() {
    let app = test_app();
    let (_, alice) = register(&app, "Alice", "alice", "alice@example.com").await;
    let (bob_id, bob) = register(&app, "Bob", "bob", "bob@example.com").await;

    let (_, post) = send(
        &app,
        "POST",
        "/posts",
        Some(&alice),
        Some(json!({"content": "hello"})),
    )
    .await;
    let post_id = post["id"].as_str().unwrap().to_string();

    // POST toggles the like on.
    let (status, liked) = send(
        &app,
        "POST",
        &format!("/posts/{post_id}/like"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(liked["likerIds"], json!([bob_id]));

    // Bob's view of the feed reflects his like.
    let (_, feed) = send(&app, "GET", "/posts", Some(&bob), None).await;
    assert_eq!(feed[0]["likedByMe"], true);
    assert_eq!(feed[0]["likesCount"], 1);

    // DELETE maps to the same toggle and removes it.
    let (status, unliked) = send(
        &app,
        "DELETE",
        &format!("/posts/{post_id}/like"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unliked["likerIds"], json!([]));
}

#[tokio::test]
async fn test_like_unknown_post_is_not_found() {
    let app = test_app();
    let (_, token) = register(&app, "Alice", "alice", "alice@example.com").await;

    let (status, body) = send(&app, "POST", "/posts/missing/like", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "POST_NOT_FOUND");
}

#[tokio::test]
async fn test_comment_flow() {
    let app = test_app();
    let (_, alice) = register(&app, "Alice", "alice", "alice@example.com").await;
    let (_, bob) = register(&app, "Bob", "bob", "bob@example.com").await;

    let (_, post) = send(
        &app,
        "POST",
        "/posts",
        Some(&alice),
        Some(json!({"content": "hello"})),
    )
    .await;
    let post_id = post["id"].as_str().unwrap().to_string();

    let (status, comment) = send(
        &app,
        "POST",
        &format!("/posts/{post_id}/comments"),
        Some(&bob),
        Some(json!({"content": "nice post"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comment["content"], "nice post");

    // Empty comments are rejected.
    let (status, _) = send(
        &app,
        "POST",
        &format!("/posts/{post_id}/comments"),
        Some(&bob),
        Some(json!({"content": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The public listing carries the comment author.
    let (status, comments) = send(
        &app,
        "GET",
        &format!("/posts/{post_id}/comments"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comments.as_array().unwrap().len(), 1);
    assert_eq!(comments[0]["user"]["username"], "bob");

    // And the feed count tracks it.
    let (_, feed) = send(&app, "GET", "/posts", None, None).await;
    assert_eq!(feed[0]["commentsCount"], 1);
}

#[tokio::test]
async fn test_reshare_flow() {
    let app = test_app();
    let (_, alice) = register(&app, "Alice", "alice", "alice@example.com").await;
    let (_, bob) = register(&app, "Bob", "bob", "bob@example.com").await;

    let (_, post) = send(
        &app,
        "POST",
        "/posts",
        Some(&alice),
        Some(json!({"content": "hello"})),
    )
    .await;
    let post_id = post["id"].as_str().unwrap().to_string();

    // Alice cannot reshare her own post.
    let (status, _) = send(
        &app,
        "POST",
        &format!("/posts/{post_id}/reshare"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Bob can.
    let (status, reshare) = send(
        &app,
        "POST",
        &format!("/posts/{post_id}/reshare"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reshare["originalPostId"], post["id"]);
    assert_eq!(reshare["content"], "hello");
    assert_eq!(reshare["likerIds"], json!([]));

    // Bob cannot reshare his own reshare.
    let reshare_id = reshare["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        "POST",
        &format!("/posts/{reshare_id}/reshare"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The failed attempts created nothing: original + one reshare.
    let (_, feed) = send(&app, "GET", "/posts", None, None).await;
    assert_eq!(feed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_follow_toggle_and_graph_reads() {
    let app = test_app();
    let (alice_id, alice) = register(&app, "Alice", "alice", "alice@example.com").await;
    let (bob_id, bob) = register(&app, "Bob", "bob", "bob@example.com").await;

    // POST follows.
    let (status, body) = send(
        &app,
        "POST",
        &format!("/users/{alice_id}/follow"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["following"], true);

    let (_, following) = send(&app, "GET", &format!("/users/{bob_id}/following"), None, None).await;
    assert_eq!(following["followingIds"], json!([alice_id]));

    let (_, followers) = send(&app, "GET", &format!("/users/{alice_id}/followers"), None, None).await;
    assert_eq!(followers[0]["username"], "bob");

    // Alice's feed flag from Bob's perspective.
    send(
        &app,
        "POST",
        "/posts",
        Some(&alice),
        Some(json!({"content": "hello"})),
    )
    .await;
    let (_, feed) = send(&app, "GET", "/posts", Some(&bob), None).await;
    assert_eq!(feed[0]["followedByViewer"], true);

    // DELETE maps to the same toggle and removes the edge.
    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/users/{alice_id}/follow"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["following"], false);

    let (_, following) = send(&app, "GET", &format!("/users/{bob_id}/following"), None, None).await;
    assert_eq!(following["followingIds"], json!([]));
}

#[tokio::test]
async fn test_follow_rejects_self_and_unknown() {
    let app = test_app();
    let (alice_id, alice) = register(&app, "Alice", "alice", "alice@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/users/{alice_id}/follow"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/users/ghost/follow", Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_profile_aggregates_counts() {
    let app = test_app();
    let (alice_id, alice) = register(&app, "Alice", "alice", "alice@example.com").await;
    let (_, bob) = register(&app, "Bob", "bob", "bob@example.com").await;

    send(
        &app,
        "POST",
        "/posts",
        Some(&alice),
        Some(json!({"content": "hello"})),
    )
    .await;
    send(
        &app,
        "POST",
        &format!("/users/{alice_id}/follow"),
        Some(&bob),
        None,
    )
    .await;

    let (status, profile) = send(&app, "GET", &format!("/users/{alice_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["user"]["username"], "alice");
    assert_eq!(profile["postsCount"], 1);
    assert_eq!(profile["followersCount"], 1);
    assert_eq!(profile["followingCount"], 0);
    assert_eq!(profile["posts"][0]["content"], "hello");

    let (status, body) = send(&app, "GET", "/users/ghost", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_user_directory_lists_registrations() {
    let app = test_app();
    register(&app, "Alice", "alice", "alice@example.com").await;
    register(&app, "Bob", "bob", "bob@example.com").await;

    let (status, body) = send(&app, "GET", "/users", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let usernames: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames, ["alice", "bob"]);
}
