//! Test helper module for food-analysis-service integration tests.
//!
//! Spawns the real application on a random port with the OpenRouter base URL
//! pointed at a wiremock server.

#![allow(dead_code)]

use food_analysis_service::config::{Config, OpenRouterConfig, ServerConfig};
use food_analysis_service::startup::Application;
use secrecy::Secret;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "sk-or-test-key";

/// Test application wrapper for integration tests.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub mock_server: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn a test application wired to a mock upstream.
    pub async fn spawn() -> Self {
        Self::spawn_with_api_key(TEST_API_KEY).await
    }

    /// Spawn with an explicit API key. An empty key simulates a deployment
    /// where the credential was never provided.
    pub async fn spawn_with_api_key(api_key: &str) -> Self {
        let mock_server = MockServer::start().await;

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
                static_dir: "static".to_string(),
            },
            openrouter: OpenRouterConfig {
                api_key: Secret::new(api_key.to_string()),
                base_url: mock_server.uri(),
                model: "google/gemini-2.5-flash-image-preview:free".to_string(),
                referer: "http://localhost:5000/".to_string(),
                app_title: "Leitor de Comida".to_string(),
                timeout_seconds: 5,
            },
            service_name: "food-analysis-service-test".to_string(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let address = format!("http://127.0.0.1:{}", port);
        let client = reqwest::Client::new();

        // Wait for the server to be ready by polling the health endpoint
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            mock_server,
            client,
        }
    }

    /// POST a raw JSON string to the analyze endpoint.
    pub async fn post_analyze(&self, body: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/analyze", self.address))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to execute request")
    }
}
