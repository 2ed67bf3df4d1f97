use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;

use crate::error::ClientError;
use crate::types::{JobSubmission, Prediction, PredictionRequest};

const API_URL: &str = "https://api.replicate.com/v1/predictions";

/// Boundary to the remote prediction service.
///
/// The poller and orchestrator are written against this trait so tests can
/// script submissions and status sequences without a network.
#[async_trait]
pub trait JobClient: Send + Sync {
    /// Submit a new prediction and return its job handle.
    async fn submit(&self, request: &PredictionRequest) -> Result<JobSubmission, ClientError>;

    /// Fetch the current status snapshot for a submitted prediction.
    async fn fetch_status(&self, id: &str) -> Result<Prediction, ClientError>;
}

/// HTTP implementation of [`JobClient`] backed by reqwest.
///
/// Credentials are read-only and the underlying client is safe to share
/// across concurrent generation invocations.
pub struct ReplicateClient {
    token: String,
    client: Client,
    base_url: String,
}

impl ReplicateClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, API_URL.to_string())
    }

    /// Create a client pointing at a custom base URL (useful for testing).
    pub fn with_base_url(token: String, base_url: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            token,
            client,
            base_url,
        }
    }
}

#[async_trait]
impl JobClient for ReplicateClient {
    async fn submit(&self, request: &PredictionRequest) -> Result<JobSubmission, ClientError> {
        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Token {}", self.token))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let prediction = response.json::<Prediction>().await?;
        Ok(JobSubmission {
            id: prediction.id,
            submitted_at: Utc::now(),
        })
    }

    async fn fetch_status(&self, id: &str) -> Result<Prediction, ClientError> {
        let response = self
            .client
            .get(format!("{}/{id}", self.base_url))
            .header("Authorization", format!("Token {}", self.token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Prediction>().await?)
    }
}
