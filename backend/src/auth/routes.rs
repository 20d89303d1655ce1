//! Defines the HTTP routes specifically for authentication.
//!
//! These routes are designed to be merged into the main Axum router.

use crate::auth::handlers::*;
use crate::state::AppState;
use axum::{Router, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/login", post(signin))
}
