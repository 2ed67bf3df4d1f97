use axum::{http::StatusCode, response::IntoResponse};

/// GET /health
/// Liveness probe for monitoring.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
