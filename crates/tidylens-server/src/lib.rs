pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Requests may carry base64-encoded photos; allow up to 10 MB.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/vision/analyze", post(routes::vision::analyze))
        .route("/replicate/generate", post(routes::generate::generate_image))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP service on a pre-bound listener.
///
/// Accepting a `TcpListener` lets the caller bind first and read the actual
/// port (useful when binding port 0).
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("tidylens API listening on http://{addr}");

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
