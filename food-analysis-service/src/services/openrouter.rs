//! OpenRouter inference client.
//!
//! Implements the chat-completions call that performs the actual food image
//! analysis. The upstream response body is treated as opaque JSON and handed
//! back verbatim; its shape is a contract between the model and the UI.

use crate::config::OpenRouterConfig;
use anyhow::{anyhow, Result};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;
use std::time::Duration;

/// Fixed instruction sent with every image. The model is asked for a JSON
/// object whose values are HTML fragments rendered directly by the UI.
const ANALYSIS_PROMPT: &str = r#"Analise a imagem do alimento e forneça uma resposta em JSON. As chaves devem ser: "descricao", "ingredientes", "modoDePreparo", "tabelaNutricional", "historia". Os valores devem ser strings formatadas em HTML (use <ul>, <li>, <p>, <strong>). A tabela nutricional deve ser uma string HTML simples."#;

/// OpenRouter client for the chat-completions API.
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    config: OpenRouterConfig,
}

/// Request body for the chat-completions endpoint.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier (e.g., "google/gemini-2.5-flash-image-preview:free").
    pub model: String,
    /// A single user turn carrying the prompt and the image.
    pub messages: Vec<ChatMessage>,
}

/// One chat turn with multimodal content parts.
#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
pub struct ImageUrl {
    /// Base64 data URI or remote URL of the image.
    pub url: String,
}

impl OpenRouterClient {
    /// Create a new OpenRouter client.
    pub fn new(config: OpenRouterConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Check if OpenRouter is configured (API key is set).
    pub fn is_configured(&self) -> bool {
        !self.config.api_key.expose_secret().is_empty()
    }

    /// Build the chat-completions payload for one image.
    fn build_request(&self, image: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: ANALYSIS_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image.to_string(),
                        },
                    },
                ],
            }],
        }
    }

    /// Send one image for analysis and return the upstream JSON verbatim.
    ///
    /// A single attempt is made; failures are reported to the caller, never
    /// retried.
    pub async fn analyze_image(&self, image: &str) -> Result<serde_json::Value> {
        let request = self.build_request(image);
        let url = format!("{}/chat/completions", self.config.base_url);

        tracing::debug!(
            model = %self.config.model,
            image_len = image.len(),
            "Sending analysis request to OpenRouter"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.app_title)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to reach OpenRouter");
                anyhow!("Failed to communicate with the OpenRouter API: {}", e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read OpenRouter response body");
            anyhow!("Failed to communicate with the OpenRouter API: {}", e)
        })?;

        tracing::debug!(status = %status, body_len = body.len(), "OpenRouter response received");

        if status.is_success() {
            let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
                tracing::error!(error = %e, "OpenRouter returned a non-JSON success body");
                anyhow!(
                    "Failed to communicate with the OpenRouter API: invalid JSON in response: {}",
                    e
                )
            })?;
            Ok(value)
        } else {
            tracing::error!(status = %status, body = %body, "OpenRouter request failed");
            Err(anyhow!(
                "Failed to communicate with the OpenRouter API: upstream returned an error. Status: {}. Response: {}",
                status.as_u16(),
                body
            ))
        }
    }
}
