use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
