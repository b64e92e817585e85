use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::ports::AuthenticationServicePort;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserDirectory;

pub async fn login<D: UserDirectory>(
    State(state): State<AppState<D>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = body?;
    let command = body.try_into_command()?;
    let cancel = state.shutdown.child_token();

    state
        .authentication_service
        .login(command, &cancel)
        .await
        .map_err(|e| ApiError::from_authentication(e, ApiError::Unauthorized))
        .map(|pair| ApiSuccess::new(StatusCode::OK, pair.into()))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        let email = self.email.trim();
        let password = self.password.trim();

        if email.is_empty() {
            return Err(ApiError::BadRequest("empty email".to_string()));
        }
        if password.is_empty() {
            return Err(ApiError::BadRequest("empty password".to_string()));
        }

        Ok(LoginCommand {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}
