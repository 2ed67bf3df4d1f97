use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use replicate_client::{generate, GenerationRequest};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    #[serde(default)]
    pub image_url: Option<String>,
}

/// POST /replicate/generate — drive one tidy-image generation to its
/// terminal result and relay it.
///
/// Validation, submission, and polling errors all surface through
/// [`AppError`]: 400 for a missing source image, 502 for remote failures,
/// 504 when the poll budget runs out.
pub async fn generate_image(
    State(app): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let request = GenerationRequest {
        image_url: body.image_url.unwrap_or_default(),
    };

    let output = generate(&request, app.replicate.as_ref(), &app.poll).await?;

    info!(
        prediction_id = %output.prediction_id,
        "generation completed"
    );

    Ok(Json(serde_json::json!({
        "data": {
            "predictionId": output.prediction_id,
            "outputUrl": output.output_url,
        }
    })))
}
