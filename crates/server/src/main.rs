//! Chirp-rs server entry point.

use std::net::SocketAddr;

use chirp_api::{AppState, TokenSigner, middleware::auth_middleware, router as api_router};
use chirp_common::Config;
use chirp_core::{FollowingService, PostService, ProfileService, UserService};
use chirp_store::{CommentStore, FollowGraph, PostStore, UserStore};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirp=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting chirp-rs server...");

    // Load configuration
    let config = Config::load()?;

    // Initialize stores. All state lives in this process; nothing is
    // persisted across restarts.
    let user_store = UserStore::new();
    let post_store = PostStore::new();
    let comment_store = CommentStore::new();
    let follow_graph = FollowGraph::new();

    // Initialize services
    let user_service = UserService::new(user_store.clone());
    let following_service = FollowingService::new(follow_graph.clone(), user_store.clone());
    let post_service = PostService::new(
        post_store.clone(),
        comment_store,
        user_store.clone(),
        follow_graph.clone(),
    );
    let profile_service = ProfileService::new(user_store, post_store, follow_graph);

    // Token signer for the auth endpoints and middleware
    let tokens = TokenSigner::new(&config.auth.jwt_secret, config.auth.token_ttl_secs);

    // Create app state
    let state = AppState {
        user_service,
        following_service,
        post_service,
        profile_service,
        tokens,
    };

    // Build router
    let app = api_router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
