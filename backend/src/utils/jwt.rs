//! JWT token utilities for authentication.
//!
//! Provides stateless token creation and validation. Tokens are HS256-signed
//! with the process-wide secret from [`Config`]; verification needs nothing
//! but that secret, so no token is ever stored server side.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};

/// Value of the `iss` claim on every token this service mints.
pub const ISSUER: &str = "course";

/// The only signing algorithm accepted.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT Claims structure identifying the authenticated user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Email of the user the token was issued to
    pub email: String,
    /// Token issuer, always [`ISSUER`]
    pub iss: String,
    /// Token issued at timestamp
    pub iat: u64,
    /// Token expiration timestamp
    pub exp: u64,
}

impl Claims {
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Verification failure.
///
/// Signature mismatch, malformed structure, unexpected algorithm, wrong
/// issuer and expiry all collapse into the same value so a caller cannot tell
/// them apart.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token validation failed.")]
    Invalid,
}

impl From<TokenError> for ServiceError {
    fn from(error: TokenError) -> Self {
        ServiceError::invalid_token(error.to_string())
    }
}

/// Mints signed bearer tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    expires_in_seconds: u64,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], expires_in_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            expires_in_seconds,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.jwt_secret.as_bytes(), config.jwt_expires_in_seconds)
    }

    /// Generate a new JWT token carrying the user's email.
    pub fn issue(&self, email: &str) -> ServiceResult<String> {
        let now = Utc::now();
        let exp = i64::try_from(self.expires_in_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                ServiceError::server_error(anyhow::anyhow!(
                    "token lifetime of {} seconds is out of range",
                    self.expires_in_seconds
                ))
            })?;

        let claims = Claims {
            email: email.to_string(),
            iss: ISSUER.to_string(),
            iat: now.timestamp() as u64,
            exp: exp.timestamp() as u64,
        };

        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> ServiceResult<String> {
        encode(&Header::new(ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| ServiceError::server_error(anyhow::anyhow!("token signing failed: {}", e)))
    }
}

/// Validates presented bearer tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = true;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.jwt_secret.as_bytes())
    }

    /// Validate and decode a JWT token.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        // Refuse anything not signed with the expected HMAC algorithm before
        // the signature is looked at. An `alg` of `none` fails to parse here.
        let header = decode_header(token).map_err(|e| {
            tracing::debug!("Token header rejected: {}", e);
            TokenError::Invalid
        })?;

        if header.alg != ALGORITHM {
            tracing::debug!("Token signed with unexpected algorithm {:?}", header.alg);
            return Err(TokenError::Invalid);
        }

        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                TokenError::Invalid
            })
    }
}
