use async_trait::async_trait;
use auth::TokenPair;
use tokio_util::sync::CancellationToken;

use crate::domain::authentication::errors::AuthenticationError;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::RegistrationCommand;

/// Port for credential issuance.
#[async_trait]
pub trait AuthenticationServicePort: Send + Sync + 'static {
    /// Create an account and issue its first token pair.
    ///
    /// # Errors
    /// * `LoginAlreadyExists` - Login is taken (checked before email)
    /// * `EmailAlreadyExists` - Email is registered
    /// * `PasswordHashing` - Hashing failed
    /// * `Directory` - User store failed
    /// * `AccessTokenGenerationFailed` / `RefreshTokenGenerationFailed`
    /// * `Cancelled` / `DeadlineExceeded`
    async fn register(
        &self,
        command: RegistrationCommand,
        cancel: &CancellationToken,
    ) -> Result<TokenPair, AuthenticationError>;

    /// Check credentials and issue a token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No user with this email
    /// * `InvalidPassword` - Password does not match
    /// * `Directory` - User store failed
    /// * `AccessTokenGenerationFailed` / `RefreshTokenGenerationFailed`
    /// * `Cancelled` / `DeadlineExceeded`
    async fn login(
        &self,
        command: LoginCommand,
        cancel: &CancellationToken,
    ) -> Result<TokenPair, AuthenticationError>;
}
