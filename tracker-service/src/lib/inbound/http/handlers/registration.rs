use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::authentication::models::RegistrationCommand;
use crate::domain::authentication::ports::AuthenticationServicePort;
use crate::domain::user::models::Appearance;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;
use crate::user::errors::AppearanceError;
use crate::user::errors::EmailError;
use crate::user::ports::UserDirectory;

pub async fn register<D: UserDirectory>(
    State(state): State<AppState<D>>,
    body: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = body?;
    let command = body.try_into_command()?;
    let cancel = state.shutdown.child_token();

    state
        .authentication_service
        .register(command, &cancel)
        .await
        .map_err(|e| ApiError::from_authentication(e, ApiError::BadRequest))
        .map(|pair| ApiSuccess::new(StatusCode::CREATED, pair.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    login: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    appearance: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
enum ParseRegistrationRequestError {
    #[error("empty login")]
    EmptyLogin,

    #[error("empty email")]
    EmptyEmail,

    #[error("empty password")]
    EmptyPassword,

    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Appearance(#[from] AppearanceError),
}

impl RegistrationRequest {
    fn try_into_command(self) -> Result<RegistrationCommand, ParseRegistrationRequestError> {
        let login = self.login.trim();
        let email = self.email.trim();
        let password = self.password.trim();

        if login.is_empty() {
            return Err(ParseRegistrationRequestError::EmptyLogin);
        }
        if email.is_empty() {
            return Err(ParseRegistrationRequestError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(ParseRegistrationRequestError::EmptyPassword);
        }

        Ok(RegistrationCommand {
            login: login.to_string(),
            email: EmailAddress::new(email.to_string())?,
            password: password.to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            appearance: Appearance::parse_or_default(self.appearance.trim())?,
        })
    }
}

impl From<ParseRegistrationRequestError> for ApiError {
    fn from(err: ParseRegistrationRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
