use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenPayload;
use super::errors::JwtError;

/// Algorithms accepted at decode time. Anything outside the HMAC family is
/// rejected before the signature is looked at.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Stateless issuer and verifier of bearer tokens.
///
/// Signs with HS256. Holds no per-token state: a token is valid as long as its
/// signature checks out and it is inside its validity window.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    validation: Validation,
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing secret (should be at least 32 bytes)
    /// * `issuer` - Application name, used for both `iss` and `aud`
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        let issuer = issuer.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_issuer(&[&issuer]);
        validation.set_audience(&[&issuer]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer,
            validation,
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Sign a token carrying `payload`, valid from now for `validity`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn generate(&self, payload: &TokenPayload, validity: Duration) -> Result<String, JwtError> {
        let claims = Claims::new(payload.clone(), &self.issuer, validity, Utc::now());

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return the identity it carries.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, foreign algorithm, outside the
    ///   validity window, wrong issuer/audience, or malformed
    pub fn decode(&self, token: &str) -> Result<TokenPayload, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        Ok(token_data.claims.payload)
    }

    /// Boolean form of [`TokenService::decode`].
    ///
    /// Returns `Ok(true)` for a valid token and the decode error otherwise.
    pub fn verify(&self, token: &str) -> Result<bool, JwtError> {
        self.decode(token).map(|_| true)
    }
}
