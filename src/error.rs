//! Typed errors and HTTP mapping.

use crate::case::to_camel_case;
use crate::response::{self, ApiResponse};
use crate::service::ValidationError;
use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    /// Deliberately generic so callers cannot tell which credential check failed.
    #[error("invalid credentials")]
    Unauthorized,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {error}")]
    Conflict { error: String, message: &'static str },
    #[error("too many requests")]
    TooManyRequests,
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("internal: {0}")]
    Internal(String),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity } => AppError::NotFound(format!("{} not found", entity)),
            StoreError::Conflict { entity, column } => AppError::Conflict {
                error: format!("{} with this {} already exists", entity, to_camel_case(&column)),
                message: "Request failed",
            },
            other => AppError::Store(other),
        }
    }
}

impl AppError {
    fn to_envelope(&self) -> ApiResponse {
        match self {
            AppError::Validation(e) => response::validation_error(e),
            AppError::Unauthorized => response::unauthorized("Invalid credentials"),
            AppError::NotFound(e) => response::not_found(e.as_str()),
            AppError::Conflict { error, message } => {
                response::error_response(error.as_str(), StatusCode::BAD_REQUEST, *message)
            }
            AppError::TooManyRequests => response::too_many_requests(),
            AppError::PayloadTooLarge => response::payload_too_large(),
            AppError::Internal(_) | AppError::Store(_) => response::internal_error(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, AppError::Internal(_) | AppError::Store(_)) {
            tracing::error!(error = %self, "request failed");
        }
        self.to_envelope().into_response()
    }
}
