//! Middleware for protecting authenticated routes.
//!
//! A request moves through `Unauthenticated -> TokenPresented` once a
//! well-shaped `Authorization: Bearer <token>` header is found, and then ends
//! in either `Verified` (the wrapped handler runs with the claims attached)
//! or `Rejected` (a single 401 response, the handler never runs).

use crate::api::common::{ApiError, service_error_to_http};
use crate::errors::{ServiceError, ServiceResult};
use crate::state::AppState;
use crate::utils::jwt::{Claims, TokenVerifier};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Message for a missing or malformed `Authorization` header.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid Token.";

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// The header must split on a single space into exactly two parts.
pub fn bearer_token(headers: &HeaderMap) -> ServiceResult<&str> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| ServiceError::invalid_token(INVALID_TOKEN_MESSAGE))?;

    match auth_header.split(' ').collect::<Vec<_>>().as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(*token),
        _ => Err(ServiceError::invalid_token(INVALID_TOKEN_MESSAGE)),
    }
}

/// Runs the header check and token verification for one request.
pub fn authorize(headers: &HeaderMap, verifier: &TokenVerifier) -> ServiceResult<Claims> {
    let token = bearer_token(headers)?;
    Ok(verifier.verify(token)?)
}

/// JWT authentication middleware
pub async fn jwt_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match authorize(request.headers(), &state.token_verifier) {
        Ok(claims) => {
            // Add claims to request extensions for use in handlers
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(error) => {
            tracing::debug!("Rejected request to {}: {}", request.uri().path(), error);
            Err(service_error_to_http(error))
        }
    }
}
