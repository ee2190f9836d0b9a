//! Unified error types for the status service.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Process-level error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised by the status service itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Request failed validation and left the state untouched.
    #[error("{0}")]
    Validation(String),
}

/// Errors surfaced to HTTP callers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Domain error from the status service.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Request body could not be decoded.
    #[error("malformed request: {0}")]
    MalformedRequest(#[from] JsonRejection),
}

/// Error envelope returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable description of the failure.
    pub detail: String,
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Service(ServiceError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::MalformedRequest(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match &self {
            ApiError::Service(err) => err.to_string(),
            ApiError::MalformedRequest(rejection) => rejection.body_text(),
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
