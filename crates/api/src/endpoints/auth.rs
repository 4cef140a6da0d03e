//! Authentication endpoints.

use axum::{Json, Router, extract::State, routing::post};
use chirp_common::AppResult;
use chirp_core::{CreateUserInput, UserView};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::middleware::AppState;

/// Registration request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Login request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for both registration and login: the user plus a bearer token.
/// The user view never carries the credential hash.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserView,
    pub token: String,
}

/// Create a new user account.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    req.validate()?;

    let input = CreateUserInput {
        name: req.name,
        username: req.username,
        email: req.email,
        password: req.password,
    };

    let user = state.user_service.register(input).await?;
    let token = state.tokens.issue(&user.id)?;

    Ok(Json(AuthResponse {
        user: UserView::from(user),
        token,
    }))
}

/// Sign in to an existing account.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = state
        .user_service
        .authenticate(&req.email, &req.password)
        .await?;
    let token = state.tokens.issue(&user.id)?;

    Ok(Json(AuthResponse {
        user: UserView::from(user),
        token,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
