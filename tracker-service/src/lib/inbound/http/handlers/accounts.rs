use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::AccountResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::service::bounded_directory_call;
use crate::domain::user::models::Appearance;
use crate::domain::user::models::UpdateAccountCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserDirectory;

/// Profile of the caller resolved by the authentication gate.
pub async fn me(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> ApiSuccess<AccountResponseData> {
    ApiSuccess::new(StatusCode::OK, (&user).into())
}

pub async fn update_account<D: UserDirectory>(
    State(state): State<AppState<D>>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    body: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> Result<ApiSuccess<AccountResponseData>, ApiError> {
    let Json(body) = body?;
    let command = body.try_into_command()?;
    let cancel = state.shutdown.child_token();

    let updated = bounded_directory_call(
        &cancel,
        state.directory_timeout,
        state.directory.update(&user.id, command),
    )
    .await
    .map_err(|e| {
        tracing::error!(user_id = %user.id, error = %e, "Account update failed");
        ApiError::from_authentication(e, ApiError::BadRequest)
    })?;

    Ok(ApiSuccess::new(StatusCode::OK, (&updated).into()))
}

/// HTTP request body for updating the caller's profile (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    appearance: String,
}

impl UpdateAccountRequest {
    fn try_into_command(self) -> Result<UpdateAccountCommand, ApiError> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        let appearance = self.appearance.trim();

        if first_name.is_empty() {
            return Err(ApiError::BadRequest("empty first name".to_string()));
        }
        if last_name.is_empty() {
            return Err(ApiError::BadRequest("empty last name".to_string()));
        }
        if appearance.is_empty() {
            return Err(ApiError::BadRequest("empty appearance".to_string()));
        }

        Ok(UpdateAccountCommand {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            appearance: appearance
                .parse::<Appearance>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(first_name: &str, last_name: &str, appearance: &str) -> UpdateAccountRequest {
        UpdateAccountRequest {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            appearance: appearance.to_string(),
        }
    }

    #[test]
    fn test_valid_update() {
        let command = request(" Jane ", "Doe", "light").try_into_command().unwrap();

        assert_eq!(
            command,
            UpdateAccountCommand {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                appearance: Appearance::Light,
            }
        );
    }

    #[test]
    fn test_every_field_is_required() {
        assert_eq!(
            request("", "Doe", "light").try_into_command(),
            Err(ApiError::BadRequest("empty first name".to_string()))
        );
        assert_eq!(
            request("Jane", " ", "light").try_into_command(),
            Err(ApiError::BadRequest("empty last name".to_string()))
        );
        assert_eq!(
            request("Jane", "Doe", "").try_into_command(),
            Err(ApiError::BadRequest("empty appearance".to_string()))
        );
    }
}
