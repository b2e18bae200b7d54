use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::auth::AuthError;
use crate::types::dto::common::ErrorResponse;

/// Error types for export, backup and import endpoints
#[derive(ApiResponse, Debug)]
pub enum TransferError {
    /// Import payload is not a usable JSON document
    #[oai(status = 400)]
    InvalidPayload(Json<ErrorResponse>),

    /// Missing or invalid bearer token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    Internal(Json<ErrorResponse>),
}

impl TransferError {
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        TransferError::InvalidPayload(Json(ErrorResponse {
            error: "invalid_payload".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        TransferError::Internal(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: message.into(),
            status_code: 500,
        }))
    }

    pub fn message(&self) -> String {
        match self {
            TransferError::InvalidPayload(json) => json.0.message.clone(),
            TransferError::Unauthorized(json) => json.0.message.clone(),
            TransferError::Internal(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<AuthError> for TransferError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InternalError(json) => TransferError::Internal(json),
            AuthError::InvalidCredentials(json)
            | AuthError::DuplicateEmail(json)
            | AuthError::InvalidToken(json)
            | AuthError::ExpiredToken(json)
            | AuthError::Forbidden(json)
            | AuthError::NotFound(json) => TransferError::Unauthorized(json),
        }
    }
}
