use anyhow::Result;
use dotenvy::dotenv;
use secrecy::Secret;
use serde::Deserialize;
use std::env;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub openrouter: OpenRouterConfig,
    pub service_name: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the static entry page served on `/`.
    pub static_dir: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct OpenRouterConfig {
    /// API key for OpenRouter. Empty when unset; the service still starts and
    /// the analyze endpoint reports a configuration error per request.
    pub api_key: Secret<String>,
    pub base_url: String,
    pub model: String,
    /// Sent as `HTTP-Referer` so OpenRouter can attribute traffic.
    pub referer: String,
    /// Sent as `X-Title`, the application name shown in OpenRouter rankings.
    pub app_title: String,
    pub timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let host = env::var("FOOD_ANALYSIS_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("FOOD_ANALYSIS_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()?;
        let static_dir =
            env::var("FOOD_ANALYSIS_STATIC_DIR").unwrap_or_else(|_| "static".to_string());

        let api_key = env::var("OPENROUTER_API_KEY").unwrap_or_default();
        let base_url = env::var("OPENROUTER_BASE_URL")
            .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string());
        let model = env::var("OPENROUTER_MODEL")
            .unwrap_or_else(|_| "google/gemini-2.5-flash-image-preview:free".to_string());
        let referer = env::var("FOOD_ANALYSIS_REFERER")
            .unwrap_or_else(|_| "http://localhost:5000/".to_string());
        let app_title =
            env::var("FOOD_ANALYSIS_TITLE").unwrap_or_else(|_| "Leitor de Comida".to_string());
        let timeout_seconds = env::var("OPENROUTER_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(Self {
            server: ServerConfig {
                host,
                port,
                static_dir,
            },
            openrouter: OpenRouterConfig {
                api_key: Secret::new(api_key),
                base_url,
                model,
                referer,
                app_title,
                timeout_seconds,
            },
            service_name: "food-analysis-service".to_string(),
        })
    }
}
