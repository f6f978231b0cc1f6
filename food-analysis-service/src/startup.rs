//! Application startup and lifecycle management.

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::handlers;
use crate::services::OpenRouterClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub openrouter: OpenRouterClient,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: Config) -> anyhow::Result<Self> {
        let openrouter = OpenRouterClient::new(config.openrouter.clone());
        if openrouter.is_configured() {
            tracing::info!("OpenRouter client initialized");
        } else {
            tracing::warn!(
                "OpenRouter API key not configured - analysis requests will be rejected"
            );
        }

        let index_page = format!("{}/index.html", config.server.static_dir);

        let state = AppState {
            config: config.clone(),
            openrouter,
        };

        let router = Router::new()
            .route_service("/", ServeFile::new(index_page))
            .route("/health", get(handlers::health_check))
            .route("/analyze", post(handlers::analyze::analyze))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");

                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                }),
            )
            .with_state(state);

        // Bind listener (port 0 = random port for testing)
        let address = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", address, e);
            anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        tracing::info!("Listening on port {}", self.port);
        axum::serve(self.listener, self.router).await?;

        Ok(())
    }
}
