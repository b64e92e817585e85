use auth::TokenPair;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::authentication::errors::AuthenticationError;
use crate::domain::user::models::User;

pub mod accounts;
pub mod health;
pub mod login;
pub mod registration;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    ServiceUnavailable(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        (status, Json(ApiErrorData { error: message })).into_response()
    }
}

impl ApiError {
    /// Map a service failure, using `fallback` for kinds that have no fixed status.
    fn from_authentication(err: AuthenticationError, fallback: fn(String) -> ApiError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials
            | AuthenticationError::InvalidPassword
            | AuthenticationError::AccessTokenGenerationFailed
            | AuthenticationError::RefreshTokenGenerationFailed => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthenticationError::Cancelled | AuthenticationError::DeadlineExceeded => {
                ApiError::ServiceUnavailable(err.to_string())
            }
            other => fallback(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenResponseData {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

/// Public view of a user. The password hash is never copied in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountResponseData {
    pub id: String,
    pub login: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    pub appearance: String,
}

impl From<&User> for AccountResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            login: user.login.clone(),
            email: user.email.as_str().to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            appearance: user.appearance.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::errors::UserError;

    #[test]
    fn test_registration_failures_fall_back_to_bad_request() {
        let err = ApiError::from_authentication(
            AuthenticationError::LoginAlreadyExists,
            ApiError::BadRequest,
        );
        assert_eq!(err, ApiError::BadRequest("login already exists".to_string()));

        let err = ApiError::from_authentication(
            AuthenticationError::Directory(UserError::DatabaseError("down".to_string())),
            ApiError::BadRequest,
        );
        assert_eq!(err, ApiError::BadRequest("Database error: down".to_string()));
    }

    #[test]
    fn test_credential_and_token_failures_are_unauthorized() {
        for err in [
            AuthenticationError::InvalidCredentials,
            AuthenticationError::InvalidPassword,
            AuthenticationError::AccessTokenGenerationFailed,
            AuthenticationError::RefreshTokenGenerationFailed,
        ] {
            let message = err.to_string();
            assert_eq!(
                ApiError::from_authentication(err, ApiError::BadRequest),
                ApiError::Unauthorized(message)
            );
        }
    }

    #[test]
    fn test_cancellation_is_service_unavailable() {
        assert_eq!(
            ApiError::from_authentication(AuthenticationError::Cancelled, ApiError::Unauthorized),
            ApiError::ServiceUnavailable("request cancelled".to_string())
        );
    }
}
