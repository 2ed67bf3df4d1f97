use std::sync::Arc;

use replicate_client::{PollConfig, ReplicateClient};

use crate::config::ServiceConfig;

const VISION_API_URL: &str = "https://vision.googleapis.com/v1/images:annotate";

/// Shared application state passed to all route handlers.
///
/// Everything here is read-only after startup, so concurrent requests share
/// it without locking.
#[derive(Clone)]
pub struct AppState {
    pub replicate: Arc<ReplicateClient>,
    /// Plain HTTP client for single-call relays (vision analysis).
    pub http: reqwest::Client,
    pub vision_api_key: String,
    pub vision_endpoint: String,
    pub poll: PollConfig,
}

impl AppState {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            replicate: Arc::new(ReplicateClient::new(config.replicate_api_token.clone())),
            http: reqwest::Client::new(),
            vision_api_key: config.vision_api_key.clone(),
            vision_endpoint: VISION_API_URL.to_string(),
            poll: config.poll_config(),
        }
    }
}
