use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("invalid email: {0}")]
    InvalidFormat(String),
}

/// Error for Appearance parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppearanceError {
    #[error("invalid appearance: {0} (expected light, dark or system)")]
    Unknown(String),
}

/// Top-level error for user directory operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error(transparent)]
    InvalidEmail(#[from] EmailError),

    #[error(transparent)]
    InvalidAppearance(#[from] AppearanceError),

    #[error("user not found")]
    NotFound(String),

    /// Raised by the store's unique constraint on login.
    #[error("login already exists")]
    LoginAlreadyExists(String),

    /// Raised by the store's unique constraint on email.
    #[error("email already exists")]
    EmailAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
