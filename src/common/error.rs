use crate::common::response::ErrorBody;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Error taxonomy of the conversion service. Every failure is handled at the
/// boundary of the request that caused it; there is no cross-request state.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request is structurally unusable (e.g. no file part).
    #[error("{0}")]
    Validation(String),

    /// The staging or output area could not be read or written.
    #[error("{0}")]
    Storage(String),

    /// The external engine exited nonzero, failed to launch, or timed out.
    /// Carries the engine's diagnostic stream verbatim.
    #[error("{0}")]
    Transcode(String),

    #[error("File not found")]
    NotFound,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) | AppError::Transcode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("❌ {}", self);
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
