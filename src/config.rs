//! Configuration module

use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,

    /// Durable sensor log file
    pub sensor_log_path: String,

    /// Risk model artifact (JSON weight dump)
    pub model_path: String,

    /// UDP bind address for the decoded radio message feed
    pub radio_bind: String,

    /// Delay between radio polls
    pub poll_interval: Duration,

    /// Static dashboard page served at /
    pub dashboard_path: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            sensor_log_path: env::var("SENSOR_LOG_PATH")
                .unwrap_or_else(|_| "sensor_data.txt".to_string()),

            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| "flood_model.json".to_string()),

            radio_bind: env::var("RADIO_BIND")
                .unwrap_or_else(|_| "127.0.0.1:9300".to_string()),

            poll_interval: Duration::from_secs(
                env::var("POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1),
            ),

            dashboard_path: env::var("DASHBOARD_PATH")
                .unwrap_or_else(|_| "static/dashboard.html".to_string()),
        }
    }
}
