//! Handler functions for authentication-related API endpoints.
//!
//! These functions take the parsed JSON body, hand it to `AuthService`, and
//! turn the outcome into an HTTP response.

use crate::api::common::{ApiError, service_error_to_http};
use crate::auth::models::*;
use crate::state::AppState;
use axum::extract::{Json, State};

/// Handle user registration request
#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<UserResponse>, ApiError> {
    match state.auth_service.signup(payload).await {
        Ok(response) => Ok(Json(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user signin request
#[axum::debug_handler]
pub async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<TokenResponse>, ApiError> {
    match state.auth_service.signin(payload).await {
        Ok(response) => Ok(Json(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}
