use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::auth::errors::AuthError;

/// Lifetime of tokens minted by [`TokenService::issue_default`].
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the principal the token was issued to.
    pub id: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
    /// Issued-at timestamp (seconds since epoch). Issuers may leave it out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
}

/// Signs and verifies HS256 tokens with one process-wide secret.
///
/// The secret is handed in once at construction and never re-read.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// `leeway_secs` is the clock skew tolerated when checking `exp`.
    pub fn new(secret: &str, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Mints a token for `id` that expires after `ttl`.
    pub fn issue(&self, id: &str, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            id: id.to_string(),
            exp: (now + ttl).timestamp().max(0) as usize,
            iat: Some(now.timestamp().max(0) as usize),
        };
        self.sign(&claims)
    }

    pub fn issue_default(&self, id: &str) -> Result<String, AuthError> {
        self.issue(id, Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
    }

    /// Signs arbitrary claims.
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Checks the signature and expiry and decodes the claims.
    ///
    /// # Returns
    /// * `AuthError::TokenExpired` if `exp` is in the past (beyond the leeway).
    /// * `AuthError::InvalidToken` if the token is malformed, its signature is wrong,
    ///   or its claims cannot be decoded.
    /// * `AuthError::Internal` for any other failure of the JWT library.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| classify(e.kind()))
    }
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidToken
        | ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => AuthError::InvalidToken,
        other => AuthError::Internal(format!("{:?}", other)),
    }
}
