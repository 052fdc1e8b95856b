use thiserror::Error;

use crate::error::AppError;

/// Why a request could not be authenticated.
///
/// Every variant ends the request; the authenticator never retries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No usable `Authorization: Bearer <token>` header.
    #[error("no token provided")]
    NoToken,
    /// Bad signature, malformed token, or a token naming an unknown principal.
    #[error("invalid token")]
    InvalidToken,
    #[error("token expired")]
    TokenExpired,
    /// Anything else: unexpected verification failures, store outages.
    #[error("internal authentication error: {0}")]
    Internal(String),
}

impl AuthError {
    /// The fixed, client-safe message for this failure.
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::NoToken => "No token provided, authorization denied",
            AuthError::InvalidToken => "Invalid token",
            AuthError::TokenExpired => "Token expired",
            AuthError::Internal(_) => "Server error in authentication",
        }
    }

    /// Converts into the response-level error. Internal detail is only carried
    /// through when `expose_detail` is set.
    pub fn into_app_error(self, expose_detail: bool) -> AppError {
        let message = self.message().to_string();
        match self {
            AuthError::NoToken | AuthError::InvalidToken | AuthError::TokenExpired => {
                AppError::Unauthorized(message)
            }
            AuthError::Internal(detail) => AppError::InternalServerError {
                message,
                detail: expose_detail.then_some(detail),
            },
        }
    }
}
