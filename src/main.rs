//! Call Analyzer server binary.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use call_analyzer::adapters::ai::{OpenAIConfig, OpenAIProvider};
use call_analyzer::adapters::http::{app_router, CallAppState};
use call_analyzer::adapters::storage::CsvAnalysisLog;
use call_analyzer::application::handlers::call::{
    AnalyzeTranscriptHandler, GatewaySettings, ModelGateway,
};
use call_analyzer::config::{AppConfig, ConfigError};
use call_analyzer::ports::AIProvider;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    config
        .validate()
        .map_err(ConfigError::from)
        .context("Invalid configuration")?;

    init_tracing(&config);

    let api_key = config.ai.api_key.clone().unwrap_or_default();
    let provider = OpenAIProvider::new(
        OpenAIConfig::new(api_key)
            .with_name("groq")
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout()),
    )
    .context("Failed to build completion client")?;

    let info = provider.provider_info();
    tracing::info!(provider = %info.name, model = %info.model, "Completion provider ready");

    let gateway = ModelGateway::new(
        Arc::new(provider),
        GatewaySettings {
            max_tokens: config.ai.max_tokens,
            temperature: config.ai.temperature,
        },
    );
    let log = CsvAnalysisLog::new(&config.storage.log_path);
    tracing::info!(path = %log.path().display(), "Recording analyses");

    let handler = AnalyzeTranscriptHandler::new(gateway, Arc::new(log));
    let app = app_router(CallAppState::new(Arc::new(handler)), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
