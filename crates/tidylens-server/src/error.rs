use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use replicate_client::GenerateError;

// ---------------------------------------------------------------------------
// Internal sentinel for verbatim upstream relays
// ---------------------------------------------------------------------------

/// Private sentinel error type used to carry an upstream response's status
/// and body through the `anyhow::Error` chain, so relay endpoints can echo
/// the upstream verbatim.
#[derive(Debug)]
struct UpstreamError {
    status: u16,
    detail: String,
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.detail)
    }
}

impl std::error::Error for UpstreamError {}

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(GenerateError::Validation(msg.into()).into())
    }

    /// Relay an upstream response verbatim: its status code and body text.
    pub fn upstream(status: u16, detail: impl Into<String>) -> Self {
        Self(
            UpstreamError {
                status,
                detail: detail.into(),
            }
            .into(),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Check for the relay sentinel before falling through to GenerateError.
        if let Some(u) = self.0.downcast_ref::<UpstreamError>() {
            let status = StatusCode::from_u16(u.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let body = serde_json::json!({ "error": u.detail.clone() });
            return (status, axum::Json(body)).into_response();
        }

        let status = if let Some(e) = self.0.downcast_ref::<GenerateError>() {
            match e {
                GenerateError::Validation(_) => StatusCode::BAD_REQUEST,
                GenerateError::Submission(_)
                | GenerateError::Remote(_)
                | GenerateError::Canceled(_) => StatusCode::BAD_GATEWAY,
                GenerateError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
