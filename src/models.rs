use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use flightboard_core::{StoreError, ValidationReport};

/// Errors returned by the flight handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(ValidationReport),

    #[error("Flight not found")]
    NotFound,

    #[error("Invalid request body: {0}")]
    BadRequest(String),

    #[error("Invalid query parameters: {0}")]
    InvalidQuery(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Body for validation failures.
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub message: &'static str,
    pub errors: ValidationReport,
}

/// Body for every other error.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response for the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse {
                    message: "Validation failed",
                    errors,
                }),
            )
                .into_response(),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    message: "Flight not found",
                    error: None,
                }),
            )
                .into_response(),
            ApiError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    message: "Invalid request body",
                    error: Some(detail),
                }),
            )
                .into_response(),
            ApiError::InvalidQuery(detail) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    message: "Invalid query parameters",
                    error: Some(detail),
                }),
            )
                .into_response(),
            ApiError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        message: "Internal server error",
                        error: Some(detail),
                    }),
                )
                    .into_response()
            }
        }
    }
}
