use axum::http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;

use crate::external::metrics_repository::RepositoryError;
use crate::external::webhook::WebhookError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Could not interpret time periods in the question")]
    Unrecognized,
    #[error("Warehouse error: {0}")]
    Warehouse(#[from] RepositoryError),
    #[error("External error: {0}")]
    External(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Unrecognized => (
                StatusCode::BAD_REQUEST,
                "Could not interpret time periods in the question",
            )
                .into_response(),
            AppError::Warehouse(e) => (StatusCode::BAD_GATEWAY, e.to_string()).into_response(),
            AppError::External(msg) => (StatusCode::BAD_GATEWAY, msg).into_response(),
        }
    }
}

impl From<WebhookError> for AppError {
    fn from(value: WebhookError) -> Self {
        AppError::External(value.to_string())
    }
}
