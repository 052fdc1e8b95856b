//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every error leaves the service in the same JSON envelope:
//!
//! ```json
//! { "success": false, "message": "..." }
//! ```
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can return it
//! directly. `From` implementations for `sqlx::Error`, `validator::ValidationErrors`
//! and the store's `StoreError` allow conversion with the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::store::StoreError;

/// Generic message returned for server-side failures whose detail must stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// The failure body sent to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    /// Only present for internal errors when the service runs in development mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Represents all possible errors that can occur within the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed or is missing (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// Malformed request (HTTP 400).
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// Requested resource does not exist (HTTP 404).
    #[error("Not Found: {0}")]
    NotFound(String),
    /// Input failed validation (HTTP 422).
    #[error("Validation Error: {0}")]
    ValidationError(String),
    /// Storage failure (HTTP 500). The detail is logged, never sent to the client.
    #[error("Database Error: {0}")]
    DatabaseError(String),
    /// Unexpected server-side failure (HTTP 500).
    ///
    /// `detail` is forwarded to the client as the `error` field, so callers only
    /// fill it in when detail exposure is allowed.
    #[error("Internal Server Error: {message}")]
    InternalServerError {
        message: String,
        detail: Option<String>,
    },
}

impl AppError {
    /// Shorthand for an internal error without client-visible detail.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::InternalServerError {
            message: message.into(),
            detail: None,
        }
    }

    fn body(&self) -> ErrorBody {
        let (message, error) = match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::ValidationError(msg) => (msg.clone(), None),
            AppError::DatabaseError(_) => (INTERNAL_ERROR_MESSAGE.to_string(), None),
            AppError::InternalServerError { message, detail } => (message.clone(), detail.clone()),
        };
        ErrorBody {
            success: false,
            message,
            error,
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatabaseError(_) | AppError::InternalServerError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::DatabaseError(detail) = self {
            log::error!("Database error: {}", detail);
        }
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        match error {
            StoreError::Database(e) => e.into(),
        }
    }
}

/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Maps JSON payload failures (missing fields, wrong types) to the common envelope.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(error: AppError) -> serde_json::Value {
        let response = error.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_error_responses() {
        let error = AppError::Unauthorized("Invalid token".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::BadRequest("Invalid input".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::NotFound("Resource not found".into());
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::ValidationError("name: too long".into());
        assert_eq!(error.error_response().status(), 422);

        let error = AppError::internal("Server error");
        assert_eq!(error.error_response().status(), 500);

        let error = AppError::DatabaseError("connection reset".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[actix_rt::test]
    async fn test_envelope_shape() {
        let json = body_json(AppError::Unauthorized("Token expired".into())).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Token expired");
        assert!(json.get("error").is_none());
    }

    #[actix_rt::test]
    async fn test_database_detail_is_withheld() {
        let json = body_json(AppError::DatabaseError("relation users missing".into())).await;
        assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
        assert!(json.get("error").is_none());
    }

    #[actix_rt::test]
    async fn test_internal_detail_only_when_set() {
        let json = body_json(AppError::InternalServerError {
            message: "Server error in authentication".into(),
            detail: Some("InvalidKeyFormat".into()),
        })
        .await;
        assert_eq!(json["message"], "Server error in authentication");
        assert_eq!(json["error"], "InvalidKeyFormat");

        let json = body_json(AppError::internal("Server error in authentication")).await;
        assert!(json.get("error").is_none());
    }
}
