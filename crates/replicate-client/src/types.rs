use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Submission payload
// ---------------------------------------------------------------------------

/// Model inputs for an image-to-image prediction.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionInput {
    /// Source image URL the model will transform.
    pub image: String,
    pub prompt: String,
    pub prompt_strength: f64,
    pub num_inference_steps: u32,
}

/// Payload for `POST /v1/predictions`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest {
    /// Pinned model version hash.
    pub version: String,
    pub input: PredictionInput,
}

// ---------------------------------------------------------------------------
// Status snapshots
// ---------------------------------------------------------------------------

/// Lifecycle states reported by the predictions API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

impl PredictionStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }
}

/// One status snapshot of a submitted prediction.
///
/// A snapshot is never mutated; each poll produces a fresh value that
/// supersedes the previous one.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    /// Model output. Depending on the model this is a list of URLs or a
    /// single string; absent until the prediction succeeds.
    #[serde(default)]
    pub output: Option<serde_json::Value>,
    /// Remote-provided failure reason, when the prediction failed.
    #[serde(default)]
    pub error: Option<String>,
}

impl Prediction {
    /// Extract the usable output: the first element when the output is a
    /// list, the string itself when scalar. Returns `None` for an absent
    /// output, an empty list, or a non-string value.
    pub fn first_output(&self) -> Option<String> {
        match self.output.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => items.first()?.as_str().map(String::from),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Submission handle
// ---------------------------------------------------------------------------

/// Handle returned by a successful submission. Created once per generation
/// call and owned by that invocation; never persisted by this crate.
#[derive(Debug, Clone)]
pub struct JobSubmission {
    pub id: String,
    pub submitted_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
