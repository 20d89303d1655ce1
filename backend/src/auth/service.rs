//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::auth::password::PasswordHasher;
use crate::database::models::CreateUser;
use crate::errors::{CredentialFailure, ServiceError, ServiceResult};
use crate::repositories::user_repository::UserStore;
use crate::utils::jwt::TokenIssuer;
use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// Authentication service for handling signup and signin
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    issuer: TokenIssuer,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher, issuer: TokenIssuer) -> Self {
        AuthService {
            store,
            hasher,
            issuer,
        }
    }

    /// Register a new user.
    ///
    /// The returned record never carries the password or its hash. Any store
    /// failure, a taken email included, is reported as a plain server error.
    pub async fn signup(&self, credentials: Credentials) -> ServiceResult<UserResponse> {
        validate_credentials(&credentials)?;

        let Credentials { email, password } = credentials;
        let password_hash = self.hash_password(password).await?;

        let user = self
            .store
            .create_user(CreateUser {
                email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User signed up");

        Ok(UserResponse {
            id: user.id,
            email: user.email,
            password: String::new(),
        })
    }

    /// Authenticate a user and issue a bearer token.
    pub async fn signin(&self, credentials: Credentials) -> ServiceResult<TokenResponse> {
        validate_credentials(&credentials)?;

        let user = self
            .store
            .find_user_by_email(&credentials.email)
            .await?
            .ok_or_else(|| {
                warn!("Sign-in attempted for an unknown account");
                ServiceError::InvalidCredentials(CredentialFailure::UnknownUser)
            })?;

        let matches = self
            .verify_password(credentials.password, user.password_hash.clone())
            .await?;

        if !matches {
            warn!(user_id = user.id, "Sign-in rejected: wrong password");
            return Err(ServiceError::InvalidCredentials(
                CredentialFailure::WrongPassword,
            ));
        }

        let token = self.issuer.issue(&user.email)?;
        info!(user_id = user.id, "User signed in");

        Ok(TokenResponse { token })
    }

    // bcrypt is deliberately slow; keep it off the async workers.
    async fn hash_password(&self, password: String) -> ServiceResult<String> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .context("password hashing task failed")?
    }

    async fn verify_password(&self, password: String, hash: String) -> ServiceResult<bool> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .context("password verification task failed")?
    }
}

/// Rejects empty fields before anything touches the hasher or the store.
/// Email is reported first when both are missing.
fn validate_credentials(credentials: &Credentials) -> ServiceResult<()> {
    let Err(validation_errors) = credentials.validate() else {
        return Ok(());
    };

    let field_errors = validation_errors.field_errors();
    let field = if field_errors.contains_key("email") {
        "email"
    } else {
        "password"
    };

    let message = field_errors
        .get(field)
        .and_then(|errors| errors.first())
        .and_then(|error| error.message.as_ref())
        .map(|message| message.to_string())
        .unwrap_or_else(|| format!("{} is missing.", field));

    Err(ServiceError::missing_field(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::database::models::User;
    use crate::repositories::user_repository::UserRepository;
    use crate::utils::jwt::TokenVerifier;
    use async_trait::async_trait;

    const SECRET: &[u8] = b"service-test-secret";

    struct BrokenStore;

    #[async_trait]
    impl UserStore for BrokenStore {
        async fn find_user_by_email(&self, _email: &str) -> anyhow::Result<Option<User>> {
            Err(anyhow::anyhow!("database is locked"))
        }

        async fn create_user(&self, _user: CreateUser) -> anyhow::Result<User> {
            Err(anyhow::anyhow!("database is locked"))
        }
    }

    fn service_with(store: Arc<dyn UserStore>) -> AuthService {
        AuthService::new(
            store,
            PasswordHasher::with_cost(4),
            TokenIssuer::new(SECRET, 3600),
        )
    }

    async fn service() -> AuthService {
        let db = Database::in_memory().await.unwrap();
        service_with(Arc::new(UserRepository::new(db.pool().clone())))
    }

    #[tokio::test]
    async fn test_signup_clears_password() {
        let service = service().await;

        let user = service
            .signup(Credentials::new("a@x.com", "pw"))
            .await
            .unwrap();

        assert!(user.id > 0);
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.password, "");
    }

    #[tokio::test]
    async fn test_signup_twice_is_a_server_error() {
        let service = service().await;

        service
            .signup(Credentials::new("a@x.com", "pw"))
            .await
            .unwrap();
        let error = service
            .signup(Credentials::new("a@x.com", "other"))
            .await
            .unwrap_err();

        assert!(matches!(error, ServiceError::ServerError { .. }));
        assert_eq!(error.to_string(), "Server Error");
    }

    #[tokio::test]
    async fn test_missing_fields_are_reported_before_store_access() {
        let service = service_with(Arc::new(BrokenStore));

        let cases = [
            (Credentials::new("", "pw"), "Email is missing."),
            (Credentials::new("a@x.com", ""), "Password is missing."),
            (Credentials::new("", ""), "Email is missing."),
        ];

        for (credentials, expected) in cases {
            let error = service.signup(credentials.clone()).await.unwrap_err();
            assert!(matches!(error, ServiceError::MissingField { .. }));
            assert_eq!(error.to_string(), expected);

            let error = service.signin(credentials).await.unwrap_err();
            assert!(matches!(error, ServiceError::MissingField { .. }));
            assert_eq!(error.to_string(), expected);
        }
    }

    #[tokio::test]
    async fn test_store_failures_are_server_errors() {
        let service = service_with(Arc::new(BrokenStore));

        let error = service
            .signup(Credentials::new("a@x.com", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(error, ServiceError::ServerError { .. }));

        let error = service
            .signin(Credentials::new("a@x.com", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(error, ServiceError::ServerError { .. }));
    }

    #[tokio::test]
    async fn test_signin_unknown_user() {
        let service = service().await;

        let error = service
            .signin(Credentials::new("nobody@x.com", "pw"))
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ServiceError::InvalidCredentials(CredentialFailure::UnknownUser)
        ));
    }

    #[tokio::test]
    async fn test_signin_wrong_password() {
        let service = service().await;
        service
            .signup(Credentials::new("a@x.com", "pw"))
            .await
            .unwrap();

        let error = service
            .signin(Credentials::new("a@x.com", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ServiceError::InvalidCredentials(CredentialFailure::WrongPassword)
        ));
    }

    #[tokio::test]
    async fn test_signin_issues_verifiable_token() {
        let service = service().await;
        service
            .signup(Credentials::new("a@x.com", "pw"))
            .await
            .unwrap();

        let response = service
            .signin(Credentials::new("a@x.com", "pw"))
            .await
            .unwrap();

        let claims = TokenVerifier::new(SECRET).verify(&response.token).unwrap();
        assert_eq!(claims.email(), "a@x.com");
    }
}
