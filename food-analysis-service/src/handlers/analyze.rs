//! Image analysis relay handler.
//!
//! Validates the inbound request, forwards the image to OpenRouter wrapped in
//! the fixed analysis prompt, and returns the upstream JSON body unmodified.

use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::AppError;
use crate::startup::AppState;

/// Relay one food image to OpenRouter and pass the response through.
///
/// The body is read raw and parsed by hand so the handler owns the error
/// shape and the precondition ordering: credential, body, `image` key.
pub async fn analyze(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<Value>, AppError> {
    if !state.openrouter.is_configured() {
        tracing::error!("OpenRouter API key is not set");
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "The API key was not found on the server. Check the OPENROUTER_API_KEY configuration."
        )));
    }

    let payload: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let Some(data) = payload.as_object() else {
        tracing::warn!("Request JSON body is empty or missing");
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Invalid request: JSON body is empty or missing."
        )));
    };

    let Some(image) = data.get("image").and_then(Value::as_str) else {
        tracing::warn!("Request data has no 'image' key");
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Invalid request: 'image' key not found in request data."
        )));
    };

    tracing::debug!(image_len = image.len(), "Received base64 image from frontend");

    let response = state
        .openrouter
        .analyze_image(image)
        .await
        .map_err(AppError::Upstream)?;

    Ok(Json(response))
}
