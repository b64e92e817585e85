use auth::PasswordError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Failures of registration and login.
///
/// The display strings are returned to clients verbatim.
#[derive(Debug, Clone, Error)]
pub enum AuthenticationError {
    #[error("login already exists")]
    LoginAlreadyExists,

    #[error("email already exists")]
    EmailAlreadyExists,

    /// No user with the supplied email.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid password")]
    InvalidPassword,

    #[error("failed to generate access token")]
    AccessTokenGenerationFailed,

    #[error("failed to generate refresh token")]
    RefreshTokenGenerationFailed,

    #[error(transparent)]
    PasswordHashing(PasswordError),

    #[error(transparent)]
    Directory(UserError),

    #[error("request cancelled")]
    Cancelled,

    #[error("user directory did not respond in time")]
    DeadlineExceeded,

    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

impl AuthenticationError {
    /// Outcomes that happen during normal operation (bad input from a
    /// client), as opposed to infrastructure failures.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            AuthenticationError::LoginAlreadyExists
                | AuthenticationError::EmailAlreadyExists
                | AuthenticationError::InvalidCredentials
                | AuthenticationError::InvalidPassword
        )
    }

    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            AuthenticationError::Cancelled | AuthenticationError::DeadlineExceeded
        )
    }
}

impl From<UserError> for AuthenticationError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::LoginAlreadyExists(_) => AuthenticationError::LoginAlreadyExists,
            UserError::EmailAlreadyExists(_) => AuthenticationError::EmailAlreadyExists,
            other => AuthenticationError::Directory(other),
        }
    }
}

impl From<auth::AuthenticationError> for AuthenticationError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidPassword => AuthenticationError::InvalidPassword,
            auth::AuthenticationError::PasswordError(e) => AuthenticationError::PasswordHashing(e),
            auth::AuthenticationError::AccessTokenGenerationFailed(_) => {
                AuthenticationError::AccessTokenGenerationFailed
            }
            auth::AuthenticationError::RefreshTokenGenerationFailed(_) => {
                AuthenticationError::RefreshTokenGenerationFailed
            }
        }
    }
}
