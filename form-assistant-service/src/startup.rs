//! Application startup and lifecycle management.

use crate::config::FormAssistantConfig;
use crate::handlers::{
    form::{field_assistant, form_assistant},
    health::{health_check, ping},
    metrics::metrics,
};
use crate::middleware::auth_middleware;
use crate::services::providers::openai::{OpenAiChatProvider, OpenAiConfig};
use crate::services::providers::ChatProvider;
use crate::services::{FormAssistant, TokenValidator};
use axum::{
    http::{header, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FormAssistantConfig>,
    pub assistant: FormAssistant,
    pub tokens: TokenValidator,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        config: FormAssistantConfig,
        provider: Arc<dyn ChatProvider>,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            assistant: FormAssistant::new(provider, &config.llm),
            tokens: TokenValidator::new(&config.jwt.secret),
            config: Arc::new(config),
            metrics,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let assistant_routes = Router::new()
        .route("/assistant/form", post(form_assistant))
        .route("/assistant/form/fields", post(field_assistant))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .route("/ping", get(ping))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .merge(assistant_routes)
        .layer(from_fn(metrics_middleware))
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
        .layer(cors)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application against the configured inference endpoint.
    pub async fn build(
        config: FormAssistantConfig,
        metrics: Option<PrometheusHandle>,
    ) -> Result<Self, AppError> {
        let provider = OpenAiChatProvider::new(OpenAiConfig::from(&config.llm)).map_err(|e| {
            tracing::error!("Failed to initialize chat provider: {}", e);
            AppError::ConfigError(anyhow::anyhow!(e))
        })?;

        tracing::info!(
            model = %config.llm.model,
            base_uri = %config.llm.base_uri,
            "Initialized chat completion provider"
        );

        Self::build_with_provider(config, Arc::new(provider), metrics).await
    }

    /// Build with an explicit provider (port 0 binds a random port).
    pub async fn build_with_provider(
        config: FormAssistantConfig,
        provider: Arc<dyn ChatProvider>,
        metrics: Option<PrometheusHandle>,
    ) -> Result<Self, AppError> {
        let http_addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", http_addr, e);
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!("Form assistant service: HTTP on port {}", http_port);

        Ok(Self {
            http_port,
            http_listener,
            state: AppState::new(config, provider, metrics),
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.http_listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}
