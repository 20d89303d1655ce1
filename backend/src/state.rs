//! Shared application state handed to every handler and middleware.

use crate::auth::password::PasswordHasher;
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::repositories::user_repository::{UserRepository, UserStore};
use crate::utils::jwt::{TokenIssuer, TokenVerifier};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Everything in here is read-only after startup, so clones are cheap and
/// requests never contend on it.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub token_verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher, config: &Config) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(
                store,
                hasher,
                TokenIssuer::from_config(config),
            )),
            token_verifier: Arc::new(TokenVerifier::from_config(config)),
        }
    }

    /// Wires the SQLite-backed store with the production hash cost.
    pub fn from_pool(pool: SqlitePool, config: &Config) -> Self {
        Self::new(
            Arc::new(UserRepository::new(pool)),
            PasswordHasher::default(),
            config,
        )
    }
}
