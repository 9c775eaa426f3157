//! Sensor data handler

use axum::{extract::State, Json};

use crate::models::{DataResponse, Reading};
use crate::{AppResult, AppState};

/// Latest sensor reading with its risk classification.
///
/// An empty or absent log answers the cold-start default; a record that does
/// not parse as a reading answers an explicit error, never a partial reading.
pub async fn latest(State(state): State<AppState>) -> AppResult<Json<DataResponse>> {
    let Some(line) = state.log.read_latest().await? else {
        tracing::debug!("Sensor log empty, serving cold-start default");
        return Ok(Json(DataResponse::cold_start()));
    };

    let reading: Reading = line.parse()?;
    let danger_level = state.model.classify(&reading);

    tracing::debug!("Latest reading {} classified {}", reading, danger_level);

    Ok(Json(DataResponse::new(&reading, danger_level)))
}
