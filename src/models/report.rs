//! Query response model

use serde::Serialize;

use super::reading::Reading;
use super::risk::RiskLevel;

/// Body of `GET /data`: the latest reading plus its classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataResponse {
    pub rainfall: f64,
    pub flow_rate: f64,
    pub water_level: f64,
    pub wind_speed: f64,
    pub danger_level: RiskLevel,
}

impl DataResponse {
    pub fn new(reading: &Reading, danger_level: RiskLevel) -> Self {
        Self {
            rainfall: reading.rainfall,
            flow_rate: reading.flow_rate,
            water_level: reading.water_level,
            wind_speed: reading.wind_speed,
            danger_level,
        }
    }

    /// Served before the first record has ever been ingested. An empty store
    /// is the cold-start state, not an error.
    pub fn cold_start() -> Self {
        Self {
            rainfall: 0.0,
            flow_rate: 0.0,
            water_level: 0.0,
            wind_speed: 0.0,
            danger_level: RiskLevel::Safe,
        }
    }
}
