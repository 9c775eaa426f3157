//! Floodwatch Gateway - flood sensor telemetry server
//!
//! # Architecture
//!
//! ```text
//! radio daemon ──► Ingestion Worker ──► Sensor Log ──► Query Service ──► /data
//!  (UDP feed)       (poll + append)    (append-only      (read latest,
//!                                        text file)       classify)
//! ```
//!
//! One producer (the ingestion worker, sole owner of the append handle), one
//! durable record stream, one consumer read pattern (latest record). The
//! query path and the worker touch the log concurrently; readers never block
//! on the writer.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeFile,
    trace::TraceLayer,
};

pub mod classifier;
pub mod config;
pub mod error;
pub mod handlers;
pub mod ingest;
pub mod models;
pub mod radio;
pub mod store;

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Read handle on the sensor log; the append handle lives with the worker
    pub log: store::SensorLog,
    /// Loaded risk model, injected at startup
    pub model: Arc<classifier::RiskModel>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(log: store::SensorLog, model: classifier::RiskModel, config: config::Config) -> Self {
        Self {
            log,
            model: Arc::new(model),
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/data", get(handlers::data::latest))
        .route("/health", get(handlers::health::check))
        // Dashboard rendering is the UI collaborator's artifact; serve as-is
        .route_service("/", ServeFile::new(&state.config.dashboard_path))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
