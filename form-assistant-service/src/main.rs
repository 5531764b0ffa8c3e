use form_assistant_service::config::FormAssistantConfig;
use form_assistant_service::services::metrics::init_metrics;
use form_assistant_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = FormAssistantConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing(
        "form-assistant-service",
        &config.common.log_level,
        otlp_endpoint.as_deref(),
    );

    let metrics = match init_metrics() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!("Prometheus recorder not installed: {}", e);
            None
        }
    };

    let app = Application::build(config, metrics).await?;
    tracing::info!(port = app.http_port(), "Starting form-assistant-service");

    app.run_until_stopped().await?;

    Ok(())
}
