//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::ParseReadingError;

pub type AppResult<T> = Result<T, AppError>;

/// Query-path errors surfaced to the dashboard client. Both variants answer
/// 500; they differ in what the server logs, not in what the client sees.
#[derive(Debug, Error)]
pub enum AppError {
    /// Sensor log could not be read
    #[error("store I/O error: {0}")]
    StoreIo(#[from] std::io::Error),

    /// Stored record does not parse as a reading
    #[error("malformed record: {0}")]
    RecordFormat(#[from] ParseReadingError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::StoreIo(e) => {
                tracing::error!("Sensor log read failed: {}", e);
                "Could not fetch data"
            }
            AppError::RecordFormat(e) => {
                tracing::error!("Unparseable record in sensor log: {}", e);
                "Invalid data format"
            }
        };

        let body = Json(json!({ "error": message }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
