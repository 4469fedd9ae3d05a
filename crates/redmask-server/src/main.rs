//! Redmask server binary.

use std::net::SocketAddr;

use anyhow::Context;
use redmask_engine::MaskingEngine;
use redmask_server::{AppState, Settings, metrics::init_metrics, run_server_with_state};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load().context("Invalid settings")?;
    let addr = settings.listen_addr()?;

    info!("Starting Redmask server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        backend = ?settings.store_backend,
        redis_addr = %settings.redis_addr,
        redis_db = settings.redis_db,
        token_ttl = settings.token_ttl,
        fields = settings.fields_to_mask.len(),
        patterns = settings.patterns.len(),
        "Settings loaded"
    );

    // Starting the engine verifies the store; the binary exits if it is down.
    let engine = MaskingEngine::start(settings.engine_config())
        .await
        .context("Failed to start masking engine")?;

    let result = serve(addr, &settings, engine.clone()).await;

    if let Err(e) = engine.shutdown().await {
        error!(error = %e, "Failed to close store connection");
    }

    result
}

async fn serve(
    addr: SocketAddr,
    settings: &Settings,
    engine: MaskingEngine,
) -> anyhow::Result<()> {
    let prometheus = init_metrics().context("Failed to initialize metrics")?;
    let state = AppState::new(engine, settings.request_timeout());

    run_server_with_state(addr, state, prometheus)
        .await
        .context("Server error")
}
