mod config;
mod metrics;
mod routes;

use anyhow::{Context, Result};
use pipeline::Generator;
use sources::ApiClient;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{AppConfig, LogFormat};
use crate::metrics::Metrics;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional JSON config file as the first argument
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    // Initialize tracing
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().init(),
        LogFormat::Pretty => tracing_subscriber::fmt::init(),
    }

    let vocab = config.vocabulary()?;

    let http = reqwest::Client::builder()
        .user_agent(concat!("ddt-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let generator = Generator::new(ApiClient::new(http), vocab, config.default_format);
    let state = Arc::new(AppState::new(generator, Metrics::new()));

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .context(format!("Failed to bind {}", config.bind_address))?;

    tracing::info!(
        namespace = %config.namespace,
        format = %config.default_format,
        "Server listening on http://{}",
        config.bind_address
    );

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
