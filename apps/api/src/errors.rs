use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Terminal failure of one export. No partial artifact is ever returned with it.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Render task failed: {0}")]
    Task(String),

    #[error("Sink write failed for {filename}: {source}")]
    Sink {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Export sink unavailable: {0}")]
    SinkUnavailable(String),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::SinkUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SINK_UNAVAILABLE",
                msg.clone(),
            ),
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "The document could not be exported".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
