use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::api::krx::ApiError;

/// Error returned from request handlers.
///
/// Details are logged; the client only ever sees the status line text.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed ({}): {}", self.status, self.message);
        let body = self
            .status
            .canonical_reason()
            .unwrap_or("Internal Server Error");
        (self.status, body).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        AppError::internal(format!("Stock price provider failed: {}", e))
    }
}
