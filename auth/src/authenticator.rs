use chrono::Duration;
use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::TokenPayload;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Default access token validity.
pub const DEFAULT_ACCESS_TOKEN_TTL_HOURS: i64 = 24;

/// Default refresh token validity.
pub const DEFAULT_REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Authentication coordinator combining password verification and token issuance.
///
/// Immutable once built; share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

/// Everything an [`Authenticator`] is configured with.
#[derive(Debug, Clone)]
pub struct AuthenticatorSettings {
    pub secret: Vec<u8>,
    pub issuer: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub work_factor: u32,
}

impl AuthenticatorSettings {
    /// Settings with the default validity windows and work factor.
    pub fn new(secret: impl Into<Vec<u8>>, issuer: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            access_token_ttl: Duration::hours(DEFAULT_ACCESS_TOKEN_TTL_HOURS),
            refresh_token_ttl: Duration::days(DEFAULT_REFRESH_TOKEN_TTL_DAYS),
            work_factor: crate::password::DEFAULT_WORK_FACTOR,
        }
    }

    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    pub fn with_refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }

    pub fn with_work_factor(mut self, work_factor: u32) -> Self {
        self.work_factor = work_factor;
        self
    }
}

/// Access and refresh tokens issued together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("invalid password")]
    InvalidPassword,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("failed to generate access token")]
    AccessTokenGenerationFailed(#[source] JwtError),

    #[error("failed to generate refresh token")]
    RefreshTokenGenerationFailed(#[source] JwtError),
}

/// Errors raised while building an [`Authenticator`].
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("Invalid password hashing settings: {0}")]
    Password(#[from] PasswordError),

    #[error("Invalid token settings: {0}")]
    Jwt(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Errors
    /// * `SetupError::Jwt` - Signing secret is empty
    /// * `SetupError::Password` - Work factor is out of range
    pub fn new(settings: AuthenticatorSettings) -> Result<Self, SetupError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(settings.work_factor)?,
            token_service: TokenService::new(&settings.secret, settings.issuer)?,
            access_token_ttl: settings.access_token_ttl,
            refresh_token_ttl: settings.refresh_token_ttl,
        })
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        self.refresh_token_ttl
    }

    /// Hash a password for storage.
    ///
    /// Slow by design; call from a blocking context.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match
    /// * `MalformedHash` - Stored hash cannot be parsed
    pub fn verify_password(&self, stored_hash: &str, password: &str) -> Result<(), PasswordError> {
        self.password_hasher.verify(stored_hash, password)
    }

    /// Issue an access token and a refresh token for `payload`.
    ///
    /// # Errors
    /// * `AccessTokenGenerationFailed` - Access token could not be signed
    /// * `RefreshTokenGenerationFailed` - Refresh token could not be signed
    pub fn issue_token_pair(&self, payload: &TokenPayload) -> Result<TokenPair, AuthenticationError> {
        let access_token = self
            .token_service
            .generate(payload, self.access_token_ttl)
            .map_err(AuthenticationError::AccessTokenGenerationFailed)?;

        let refresh_token = self
            .token_service
            .generate(payload, self.refresh_token_ttl)
            .map_err(AuthenticationError::RefreshTokenGenerationFailed)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Verify credentials and issue a token pair.
    ///
    /// # Errors
    /// * `InvalidPassword` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `AccessTokenGenerationFailed` / `RefreshTokenGenerationFailed`
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        payload: &TokenPayload,
    ) -> Result<TokenPair, AuthenticationError> {
        match self.verify_password(stored_hash, password) {
            Ok(()) => {}
            Err(PasswordError::Mismatch) => return Err(AuthenticationError::InvalidPassword),
            Err(e) => return Err(e.into()),
        }

        self.issue_token_pair(payload)
    }

    /// Validate a token and return its identity payload.
    ///
    /// # Errors
    /// * `JwtError::InvalidToken` - Token is not valid for any reason
    pub fn validate_token(&self, token: &str) -> Result<TokenPayload, JwtError> {
        self.token_service.decode(token)
    }
}
