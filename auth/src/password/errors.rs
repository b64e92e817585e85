use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid hashing parameters: {0}")]
    InvalidParameters(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),

    /// The plaintext does not match the stored hash. This is the normal
    /// rejection path for a wrong password.
    #[error("Password does not match")]
    Mismatch,
}
