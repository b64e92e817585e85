use std::fmt;

use crate::domain::user::models::Appearance;
use crate::domain::user::models::EmailAddress;

/// Validated registration request.
///
/// The plaintext password is dropped as soon as it has been hashed; `Debug`
/// redacts it.
pub struct RegistrationCommand {
    pub login: String,
    pub email: EmailAddress,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub appearance: Appearance,
}

impl fmt::Debug for RegistrationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationCommand")
            .field("login", &self.login)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("appearance", &self.appearance)
            .finish()
    }
}

/// Validated login request.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
