//! Data structures for authentication requests and responses.
//!
//! These are the transport-facing shapes of the signup and signin flows.
//! Database rows live in `database::models`.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Email/password pair submitted to `/signup` and `/signin`.
///
/// Absent JSON fields deserialize as empty strings so they are reported as
/// missing fields instead of a rejected body.
#[derive(Clone, Default, Deserialize, Validate)]
pub struct Credentials {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is missing."))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is missing."))]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signup response. `password` is always empty; neither the plaintext nor
/// the hash is ever echoed back.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub password: String,
}

/// Signin response carrying the freshly issued bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
