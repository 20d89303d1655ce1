//! Defines the HTTP routes for the protected resource.
//!
//! Every route here is wrapped in `jwt_auth`, so requests without a valid
//! bearer token are answered by the middleware alone.

use super::handlers::protected;
use crate::auth::middleware::jwt_auth;
use crate::state::AppState;
use axum::{Router, middleware, routing::get};

pub fn protected_router(state: AppState) -> Router<AppState> {
    Router::new().route(
        "/protected",
        get(protected).layer(middleware::from_fn_with_state(state, jwt_auth)),
    )
}
