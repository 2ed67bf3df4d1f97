use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

const MAX_OBJECT_RESULTS: u32 = 50;
const MAX_LABEL_RESULTS: u32 = 20;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeBody {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_base64: Option<String>,
}

/// POST /vision/analyze — single-call relay to the image annotation API.
///
/// No retry or state: the upstream's answer is forwarded as-is, wrapped in
/// `{"data": …}` on success; a non-success upstream status is echoed
/// verbatim with its body.
pub async fn analyze(
    State(app): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let image = match (&body.image_url, &body.image_base64) {
        (Some(url), _) if !url.trim().is_empty() => json!({ "source": { "imageUri": url } }),
        (_, Some(content)) if !content.trim().is_empty() => json!({ "content": content }),
        _ => return Err(AppError::bad_request("Provide imageUrl or imageBase64")),
    };

    let payload = json!({
        "requests": [{
            "image": image,
            "features": [
                { "type": "OBJECT_LOCALIZATION", "maxResults": MAX_OBJECT_RESULTS },
                { "type": "LABEL_DETECTION", "maxResults": MAX_LABEL_RESULTS },
            ],
        }]
    });

    let response = app
        .http
        .post(&app.vision_endpoint)
        .query(&[("key", app.vision_api_key.as_str())])
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(AppError::upstream(status.as_u16(), text));
    }

    let data: serde_json::Value = response.json().await?;
    Ok(Json(json!({ "data": data })))
}
