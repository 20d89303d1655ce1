//! Global application error types.
//!
//! Every authentication operation returns a [`ServiceResult`]. The variants of
//! [`ServiceError`] are the only failure kinds a caller ever observes; their
//! display text is exactly what ends up in the response body, so anything
//! sensitive lives in the wrapped source and is only logged.

use thiserror::Error;

/// Why a sign-in attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFailure {
    /// No account is registered under the given email.
    UnknownUser,
    /// The account exists but the password does not match.
    WrongPassword,
}

impl CredentialFailure {
    pub fn message(self) -> &'static str {
        match self {
            CredentialFailure::UnknownUser => "The user does not exist.",
            CredentialFailure::WrongPassword => "Invalid Password",
        }
    }
}

/// Failure taxonomy shared by the auth service, the token layer and the gate.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required input field was empty.
    #[error("{message}")]
    MissingField { message: String },

    /// Lookup or password verification did not succeed.
    #[error("{}", .0.message())]
    InvalidCredentials(CredentialFailure),

    /// The bearer token was absent, malformed, or failed verification.
    #[error("{message}")]
    InvalidToken { message: String },

    /// Store, hashing or signing infrastructure failed.
    #[error("Server Error")]
    ServerError {
        #[from]
        source: anyhow::Error,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::MissingField {
            message: message.into(),
        }
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    pub fn server_error(source: impl Into<anyhow::Error>) -> Self {
        Self::ServerError {
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_hides_source() {
        let error = ServiceError::server_error(anyhow::anyhow!("UNIQUE constraint failed: users.email"));
        assert_eq!(error.to_string(), "Server Error");
    }

    #[test]
    fn test_credential_messages() {
        assert_eq!(
            ServiceError::InvalidCredentials(CredentialFailure::UnknownUser).to_string(),
            "The user does not exist."
        );
        assert_eq!(
            ServiceError::InvalidCredentials(CredentialFailure::WrongPassword).to_string(),
            "Invalid Password"
        );
    }
}
