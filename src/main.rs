use anyhow::Context;
use tracing_subscriber::EnvFilter;

use hrms::config::AppConfig;
use hrms::server;
use hrms::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up HRMS_DB_NAMES, HRMS_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hrms=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    tracing::info!("Starting HRMS API in {:?} mode", config.environment);

    // Every tenant must open before anything listens.
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::initialize(config)
        .await
        .context("failed to open tenant databases")?;
    tracing::info!("Opened {} tenant database(s)", state.registry().len());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("HRMS API listening on http://{}", bind_addr);

    server::serve(state, listener).await.context("server error")?;
    Ok(())
}
