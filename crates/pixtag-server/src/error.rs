//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`pixtag_core::Error`] via the [`AppError`]
//! wrapper so route handlers can return `Result<T, AppError>`. This is the
//! fallback tier: handlers that want a specific error body build it
//! themselves instead of going through here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
pub struct AppError(pixtag_core::Error);

impl From<pixtag_core::Error> for AppError {
    fn from(e: pixtag_core::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self.0, "Server error in API handler");
        }

        let code = match &self.0 {
            pixtag_core::Error::NotFound { .. } => "not_found",
            pixtag_core::Error::Validation(_) => "validation_error",
            pixtag_core::Error::Database(_) => "database_error",
            pixtag_core::Error::Storage(_) => "storage_error",
            pixtag_core::Error::Config(_) => "config_error",
            pixtag_core::Error::Io { .. } => "io_error",
            pixtag_core::Error::Internal(_) => "internal_error",
        };

        let body = json!({
            "error": self.0.to_string(),
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
