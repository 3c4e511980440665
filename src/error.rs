use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP clients by the relay handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("Conversion failed: {0}")]
    UpstreamFailure(String),

    #[error("Transcription failed: {0}")]
    TranscriptionFailure(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidInput(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            ApiError::UpstreamFailure(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Conversion failed", "details": details }),
            ),
            ApiError::TranscriptionFailure(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Transcription failed", "details": details }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
