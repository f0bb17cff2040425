use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use preventivo_export::error::ExportError;
use preventivo_store::error::StoreError;

/// Every failure of the quote endpoint.
///
/// All variants answer with status 500 and the same JSON envelope; `code`
/// tells them apart.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Render(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "PROJECT_NOT_FOUND",
            ApiError::Upstream(_) => "UPSTREAM_ERROR",
            ApiError::Render(_) => "RENDER_ERROR",
            ApiError::Configuration(_) => "CONFIGURATION_ERROR",
            ApiError::Internal(_) => "FUNCTION_INVOCATION_FAILED",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: &'static str,
    error: String,
    code: &'static str,
    when: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(code = self.code(), "preventivo generation failed: {self}");

        let body = ErrorBody {
            message: "Error generating PDF",
            error: self.to_string(),
            code: self.code(),
            when: jiff::Timestamp::now().to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            StoreError::Configuration(_) => ApiError::Configuration(e.to_string()),
            StoreError::Upstream(_) => ApiError::Upstream(e.to_string()),
            StoreError::Serialization(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        if e.is_render_failure() {
            ApiError::Render(e.to_string())
        } else {
            ApiError::Configuration(e.to_string())
        }
    }
}
