use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity carried inside every token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPayload {
    /// User identifier
    pub id: String,
    /// User email
    pub email: String,
}

impl TokenPayload {
    pub fn new(id: impl ToString, email: impl ToString) -> Self {
        Self {
            id: id.to_string(),
            email: email.to_string(),
        }
    }
}

/// JWT claims issued by this service.
///
/// Standard RFC 7519 claims plus the embedded `payload`. Every field is
/// required, so a token missing any of them fails to decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer (application name)
    pub iss: String,

    /// Subject (user email)
    pub sub: String,

    /// Audience (same as issuer)
    pub aud: String,

    /// JWT ID (user identifier)
    pub jti: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    pub payload: TokenPayload,
}

impl Claims {
    /// Build claims for `payload` valid from `now` for `validity`.
    ///
    /// A negative `validity` yields claims that are already expired.
    pub fn new(
        payload: TokenPayload,
        issuer: &str,
        validity: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        let issued_at = now.timestamp();

        Self {
            iss: issuer.to_string(),
            sub: payload.email.clone(),
            aud: issuer.to_string(),
            jti: payload.id.clone(),
            iat: issued_at,
            nbf: issued_at,
            exp: (now + validity).timestamp(),
            payload,
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
