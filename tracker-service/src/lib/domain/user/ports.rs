use async_trait::async_trait;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateAccountCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Narrow capability over the user store.
///
/// Uniqueness of login and email is the store's job; implementations must
/// report a violated constraint as `LoginAlreadyExists` / `EmailAlreadyExists`
/// rather than a generic database error.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `LoginAlreadyExists` - Login is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Replace the profile fields of an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, id: &UserId, command: UpdateAccountCommand) -> Result<User, UserError>;

    /// Retrieve user by identifier (None if not found).
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by exact, case-sensitive login (None if not found).
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address (None if not found).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
}
