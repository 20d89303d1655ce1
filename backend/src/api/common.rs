//! Error handling utilities for API responses.
//!
//! Converts service-layer errors into HTTP responses. Every failure body has
//! the same shape:
//!
//! ```json
//! { "message": "Human-readable message" }
//! ```
//!
//! # Error Handling Flow
//! 1. Service layer returns a `ServiceError`
//! 2. `service_error_to_http` picks the status code and logs server errors
//! 3. The handler returns the pair as its `Err` response

use crate::errors::{CredentialFailure, ServiceError};
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Body of every error response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Converts ServiceError to the matching HTTP status and body
pub fn service_error_to_http(error: ServiceError) -> ApiError {
    let status = match &error {
        ServiceError::MissingField { .. } => StatusCode::BAD_REQUEST,
        ServiceError::InvalidCredentials(CredentialFailure::UnknownUser) => StatusCode::BAD_REQUEST,
        ServiceError::InvalidCredentials(CredentialFailure::WrongPassword) => {
            StatusCode::UNAUTHORIZED
        }
        ServiceError::InvalidToken { .. } => StatusCode::UNAUTHORIZED,
        ServiceError::ServerError { source } => {
            tracing::error!("Server error: {:#}", source);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(ErrorResponse::new(error.to_string())))
}
