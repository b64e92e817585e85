//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the tracker service:
//! - Password hashing (Argon2id with a configurable work factor)
//! - Stateless JWT issuance and validation (HMAC family only)
//! - Token-pair issuance and credential checks
//!
//! Nothing in this crate logs or performs I/O; callers decide how failures are
//! reported.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&hash, "my_password").is_ok());
//! assert!(hasher.verify(&hash, "not_my_password").is_err());
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{TokenPayload, TokenService};
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", "tracker").unwrap();
//! let payload = TokenPayload::new("user123", "alice@example.com");
//! let token = tokens.generate(&payload, Duration::hours(1)).unwrap();
//! assert_eq!(tokens.decode(&token).unwrap(), payload);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, AuthenticatorSettings, TokenPayload};
//!
//! let settings = AuthenticatorSettings::new("secret_key_at_least_32_bytes_long!", "tracker")
//!     .with_work_factor(1);
//! let auth = Authenticator::new(settings).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let payload = TokenPayload::new("user123", "alice@example.com");
//! let pair = auth.authenticate("password123", &hash, &payload).unwrap();
//!
//! // Validate token
//! assert_eq!(auth.validate_token(&pair.access_token).unwrap(), payload);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::AuthenticatorSettings;
pub use authenticator::SetupError;
pub use authenticator::TokenPair;
pub use jwt::Claims;
pub use jwt::InvalidTokenReason;
pub use jwt::JwtError;
pub use jwt::TokenPayload;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
