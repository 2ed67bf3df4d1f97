use thiserror::Error;
use tracing::info;

use crate::client::JobClient;
use crate::poll::{poll, FailureKind, PollConfig, PollOutcome};
use crate::types::{PredictionInput, PredictionRequest};

// ---------------------------------------------------------------------------
// Tidy-model policy
// ---------------------------------------------------------------------------

/// Pinned version of the image-to-image model used for tidy renditions.
const MODEL_VERSION: &str = "39ed52f2a78e934b3ba6e2a89f5b1c712de7dfea535525255b1aa35c5565e08b";

const TIDY_PROMPT: &str = "same space perfectly organized and tidy, clean surfaces, \
                           everything stored, high quality, photorealistic";

const PROMPT_STRENGTH: f64 = 0.7;
const NUM_INFERENCE_STEPS: u32 = 28;

// ---------------------------------------------------------------------------
// Request / output / errors
// ---------------------------------------------------------------------------

/// Caller-facing input for one generation run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// URL of the source photo to reimagine.
    pub image_url: String,
}

/// Terminal result of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutput {
    pub prediction_id: String,
    pub output_url: String,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    /// Input rejected before any remote call was made.
    #[error("{0}")]
    Validation(String),

    /// The remote rejected job creation; polling never started. The detail
    /// carries the remote status and body verbatim.
    #[error("submission failed: {0}")]
    Submission(String),

    /// The remote reported failure, produced no usable output, or a status
    /// fetch failed mid-poll.
    #[error("{0}")]
    Remote(String),

    /// The remote job was canceled.
    #[error("{0}")]
    Canceled(String),

    /// No terminal status within the attempt budget; the job may still be
    /// running remotely.
    #[error("{0}")]
    Timeout(String),
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

/// Drive one generation to a terminal result: validate, submit, poll,
/// translate.
///
/// Calling this twice submits two independent remote jobs; deduplication by
/// input is left to the caller. Dropping the returned future (e.g. the
/// inbound connection closed) stops polling at the next await point; no
/// remote cancellation call is issued.
pub async fn generate<C>(
    request: &GenerationRequest,
    client: &C,
    config: &PollConfig,
) -> Result<GenerationOutput, GenerateError>
where
    C: JobClient + ?Sized,
{
    if request.image_url.trim().is_empty() {
        return Err(GenerateError::Validation("imageUrl is required".to_string()));
    }

    let submit_request = PredictionRequest {
        version: MODEL_VERSION.to_string(),
        input: PredictionInput {
            image: request.image_url.clone(),
            prompt: TIDY_PROMPT.to_string(),
            prompt_strength: PROMPT_STRENGTH,
            num_inference_steps: NUM_INFERENCE_STEPS,
        },
    };

    let submission = client
        .submit(&submit_request)
        .await
        .map_err(|e| GenerateError::Submission(e.to_string()))?;

    info!(prediction_id = %submission.id, "prediction submitted");

    match poll(client, &submission.id, config).await {
        PollOutcome::Completed(output_url) => Ok(GenerationOutput {
            prediction_id: submission.id,
            output_url,
        }),
        PollOutcome::Failed { kind, detail } => Err(match kind {
            FailureKind::Remote => GenerateError::Remote(detail),
            FailureKind::Canceled => GenerateError::Canceled(detail),
            FailureKind::Timeout => GenerateError::Timeout(detail),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
