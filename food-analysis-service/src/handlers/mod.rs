//! HTTP handlers for food-analysis-service.

pub mod analyze;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "food-analysis-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}
