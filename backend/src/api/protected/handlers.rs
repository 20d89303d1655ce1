//! Handler functions for the protected resource.
//!
//! The claims attached by `auth::middleware::jwt_auth` are the only input;
//! the handler is never reached without a verified token.

use crate::utils::jwt::Claims;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ProtectedResponse {
    pub message: String,
    pub email: String,
}

/// Only reached once `jwt_auth` has verified the caller's token.
pub async fn protected(Extension(claims): Extension<Claims>) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: "Welcome to the protected endpoint.".to_string(),
        email: claims.email,
    })
}
