//! Database repository for user records.
//!
//! The auth service talks to persistence only through the [`UserStore`]
//! trait, so the store is injected rather than reached through a global.

use crate::database::models::{CreateUser, User};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Persistence operations the authentication flow depends on.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks a user up by email. `Ok(None)` means no such account.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Inserts a new user. Fails if the email is already registered.
    async fn create_user(&self, user: CreateUser) -> Result<User>;
}

/// SQLite-backed [`UserStore`].
#[derive(Clone)]
pub struct UserRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool; cloning it shares the same connections
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash
            FROM users WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Uniqueness of `email` is enforced by the table constraint; a duplicate
    /// surfaces here as a database error.
    async fn create_user(&self, user: CreateUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES (?, ?)
            RETURNING id, email, password_hash
            "#,
        )
        .bind(user.email)
        .bind(user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
