use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::authentication::errors::AuthenticationError;
use crate::domain::authentication::service::bounded_directory_call;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserDirectory;

/// Extension carrying the user resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Middleware that resolves the bearer token into an `AuthenticatedUser`.
///
/// A missing or malformed `Authorization` header is answered with a bare 401
/// before the token service is consulted.
pub async fn authenticate<D: UserDirectory>(
    State(state): State<AppState<D>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(req.headers())
        .ok_or_else(|| StatusCode::UNAUTHORIZED.into_response())?;

    let payload = state.authenticator.validate_token(token).map_err(|e| {
        let reason = e.reason().map(|r| r.as_str()).unwrap_or("unknown");
        tracing::warn!(reason, "Token rejected");
        ApiError::Unauthorized(e.to_string()).into_response()
    })?;

    let user_id = UserId::from_string(&payload.id).map_err(|e| {
        tracing::warn!(error = %e, "Token carries an unparsable user id");
        ApiError::Unauthorized(e.to_string()).into_response()
    })?;

    let cancel = state.shutdown.child_token();
    let user = bounded_directory_call(
        &cancel,
        state.directory_timeout,
        state.directory.find_by_id(&user_id),
    )
    .await
    .map_err(|e| {
        tracing::warn!(user_id = %user_id, error = %e, "Identity lookup failed");
        match e {
            AuthenticationError::Cancelled | AuthenticationError::DeadlineExceeded => {
                ApiError::ServiceUnavailable(e.to_string()).into_response()
            }
            other => ApiError::Unauthorized(other.to_string()).into_response(),
        }
    })?
    .ok_or_else(|| {
        tracing::info!(user_id = %user_id, "Token subject no longer exists");
        ApiError::Unauthorized("user not found".to_string()).into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

/// Token part of `Authorization: Bearer <token>`, scheme matched case-insensitively.
///
/// The remainder after the scheme is returned untouched.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;

    let scheme = value.get(..7)?;
    let token = value.get(7..)?;
    if !scheme.eq_ignore_ascii_case("bearer ") {
        return None;
    }

    (!token.is_empty()).then_some(token)
}
