//! Floodwatch Gateway server

use std::net::SocketAddr;

use anyhow::Context;

use floodwatch_gateway::classifier::RiskModel;
use floodwatch_gateway::config::Config;
use floodwatch_gateway::radio::UdpRadio;
use floodwatch_gateway::store::SensorLog;
use floodwatch_gateway::{create_router, ingest, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "floodwatch_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Floodwatch Gateway starting...");
    tracing::info!("Sensor log: {}", config.sensor_log_path);

    // The classifier must be usable before anything is served
    let model = RiskModel::load(&config.model_path)
        .with_context(|| format!("failed to load risk model from {}", config.model_path))?;

    let log = SensorLog::new(&config.sensor_log_path);

    // Exclusive append handle; the ingestion worker is the only writer
    let writer = log
        .open_writer()
        .with_context(|| format!("failed to open {} for appending", config.sensor_log_path))?;

    let radio = UdpRadio::bind(&config.radio_bind)
        .with_context(|| format!("failed to bind radio feed on {}", config.radio_bind))?;
    tracing::info!("Radio feed on udp://{}", config.radio_bind);

    // Ingestion runs independently for the process lifetime
    tokio::spawn(ingest::run(radio, writer, config.poll_interval));

    // Build application state and router
    let state = AppState::new(log, model, config.clone());
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
