use std::fmt;

use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Error type for JWT operations.
///
/// Every validation failure is reported as `InvalidToken` and renders as the
/// same message, so callers cannot tell an expired token from a forged one.
/// The attached reason is meant for logs only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("signing secret must not be empty")]
    MissingSecret,

    #[error("failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("invalid token")]
    InvalidToken(InvalidTokenReason),
}

impl JwtError {
    /// Internal reason behind an `InvalidToken` error.
    pub fn reason(&self) -> Option<InvalidTokenReason> {
        match self {
            JwtError::InvalidToken(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Why a token was rejected.
///
/// A token lacking a required claim fails claim deserialization and is
/// reported as `Malformed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTokenReason {
    Expired,
    NotYetValid,
    BadSignature,
    WrongAlgorithm,
    WrongIssuer,
    WrongAudience,
    Malformed,
}

impl InvalidTokenReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidTokenReason::Expired => "expired",
            InvalidTokenReason::NotYetValid => "not_yet_valid",
            InvalidTokenReason::BadSignature => "bad_signature",
            InvalidTokenReason::WrongAlgorithm => "wrong_algorithm",
            InvalidTokenReason::WrongIssuer => "wrong_issuer",
            InvalidTokenReason::WrongAudience => "wrong_audience",
            InvalidTokenReason::Malformed => "malformed",
        }
    }
}

impl fmt::Display for InvalidTokenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&jsonwebtoken::errors::Error> for InvalidTokenReason {
    fn from(err: &jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => InvalidTokenReason::Expired,
            ErrorKind::ImmatureSignature => InvalidTokenReason::NotYetValid,
            ErrorKind::InvalidSignature => InvalidTokenReason::BadSignature,
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm => InvalidTokenReason::WrongAlgorithm,
            ErrorKind::InvalidIssuer => InvalidTokenReason::WrongIssuer,
            ErrorKind::InvalidAudience => InvalidTokenReason::WrongAudience,
            _ => InvalidTokenReason::Malformed,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        JwtError::InvalidToken(InvalidTokenReason::from(&err))
    }
}
