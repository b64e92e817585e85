use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenPair;
use auth::TokenPayload;
use tokio_util::sync::CancellationToken;

use crate::domain::authentication::errors::AuthenticationError;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::RegistrationCommand;
use crate::domain::authentication::ports::AuthenticationServicePort;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::UserDirectory;

/// Registration and login orchestration.
///
/// Holds only shared immutable collaborators. Directory calls race the
/// caller's cancellation token and a per-call deadline; hashing runs on the
/// blocking pool.
pub struct AuthenticationService<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
    authenticator: Arc<Authenticator>,
    directory_timeout: Duration,
}

impl<D> AuthenticationService<D>
where
    D: UserDirectory,
{
    /// Create a new authentication service.
    ///
    /// # Arguments
    /// * `directory` - User store
    /// * `authenticator` - Hashing and token issuance
    /// * `directory_timeout` - Upper bound for a single directory call
    pub fn new(
        directory: Arc<D>,
        authenticator: Arc<Authenticator>,
        directory_timeout: Duration,
    ) -> Self {
        Self {
            directory,
            authenticator,
            directory_timeout,
        }
    }

    async fn directory_call<T, F>(
        &self,
        cancel: &CancellationToken,
        call: F,
    ) -> Result<T, AuthenticationError>
    where
        F: Future<Output = Result<T, UserError>>,
    {
        bounded_directory_call(cancel, self.directory_timeout, call).await
    }

    async fn run_blocking<T, F>(
        &self,
        cancel: &CancellationToken,
        work: F,
    ) -> Result<T, AuthenticationError>
    where
        T: Send + 'static,
        F: FnOnce(&Authenticator) -> Result<T, AuthenticationError> + Send + 'static,
    {
        let authenticator = Arc::clone(&self.authenticator);
        let task = tokio::task::spawn_blocking(move || work(&authenticator));

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(AuthenticationError::Cancelled),
            joined = task => joined.map_err(|e| AuthenticationError::TaskFailed(e.to_string()))?,
        }
    }

    fn issue_token_pair(&self, user: &User) -> Result<TokenPair, AuthenticationError> {
        let payload = TokenPayload::new(user.id, user.email.as_str());

        self.authenticator
            .issue_token_pair(&payload)
            .map_err(AuthenticationError::from)
    }

    async fn try_register(
        &self,
        command: RegistrationCommand,
        cancel: &CancellationToken,
    ) -> Result<TokenPair, AuthenticationError> {
        let existing = self
            .directory_call(cancel, self.directory.find_by_login(&command.login))
            .await?;
        if existing.is_some() {
            return Err(AuthenticationError::LoginAlreadyExists);
        }

        let existing = self
            .directory_call(cancel, self.directory.find_by_email(command.email.as_str()))
            .await?;
        if existing.is_some() {
            return Err(AuthenticationError::EmailAlreadyExists);
        }

        let RegistrationCommand {
            login,
            email,
            password,
            first_name,
            last_name,
            appearance,
        } = command;

        let password_hash = self
            .run_blocking(cancel, move |authenticator| {
                authenticator
                    .hash_password(&password)
                    .map_err(AuthenticationError::PasswordHashing)
            })
            .await?;

        // A concurrent registration can still win between the checks above
        // and this insert; the store's constraint reports it with the same kinds.
        let user = self
            .directory_call(
                cancel,
                self.directory.create(NewUser {
                    login,
                    email,
                    password_hash,
                    first_name,
                    last_name,
                    appearance,
                }),
            )
            .await?;

        tracing::info!(user_id = %user.id, login = %user.login, "User registered");

        self.issue_token_pair(&user)
    }

    async fn try_login(
        &self,
        command: LoginCommand,
        cancel: &CancellationToken,
    ) -> Result<TokenPair, AuthenticationError> {
        let user = self
            .directory_call(cancel, self.directory.find_by_email(&command.email))
            .await?
            .ok_or(AuthenticationError::InvalidCredentials)?;

        let payload = TokenPayload::new(user.id, user.email.as_str());
        let stored_hash = user.password_hash;
        let password = command.password;

        let pair = self
            .run_blocking(cancel, move |authenticator| {
                authenticator
                    .authenticate(&password, &stored_hash, &payload)
                    .map_err(AuthenticationError::from)
            })
            .await?;

        tracing::debug!(user_id = %user.id, "User logged in");

        Ok(pair)
    }
}

/// Await a directory call unless `cancel` fires or `timeout` elapses first.
pub async fn bounded_directory_call<T, F>(
    cancel: &CancellationToken,
    timeout: Duration,
    call: F,
) -> Result<T, AuthenticationError>
where
    F: Future<Output = Result<T, UserError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AuthenticationError::Cancelled),
        result = tokio::time::timeout(timeout, call) => match result {
            Ok(result) => result.map_err(AuthenticationError::from),
            Err(_) => Err(AuthenticationError::DeadlineExceeded),
        },
    }
}

/// Log a failed operation once, at a level matching how surprising it is.
fn log_failure(operation: &str, subject: &str, err: &AuthenticationError) {
    if err.is_expected() {
        tracing::info!(operation, subject, error = %err, "Authentication rejected");
    } else if err.is_cancellation() {
        tracing::warn!(operation, subject, error = %err, "Authentication aborted");
    } else {
        tracing::error!(operation, subject, error = %err, "Authentication failed");
    }
}

#[async_trait]
impl<D> AuthenticationServicePort for AuthenticationService<D>
where
    D: UserDirectory,
{
    async fn register(
        &self,
        command: RegistrationCommand,
        cancel: &CancellationToken,
    ) -> Result<TokenPair, AuthenticationError> {
        let login = command.login.clone();
        let result = self.try_register(command, cancel).await;

        if let Err(e) = &result {
            log_failure("registration", &login, e);
        }

        result
    }

    async fn login(
        &self,
        command: LoginCommand,
        cancel: &CancellationToken,
    ) -> Result<TokenPair, AuthenticationError> {
        let email = command.email.clone();
        let result = self.try_login(command, cancel).await;

        if let Err(e) = &result {
            log_failure("login", &email, e);
        }

        result
    }
}
