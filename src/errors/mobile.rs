use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::entity::EntityError;
use crate::types::dto::common::ErrorResponse;

/// Error types for the mobile companion API
#[derive(ApiResponse, Debug)]
pub enum MobileError {
    /// QR token or requested record not found
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Token expired, token already used, or malformed request
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    Internal(Json<ErrorResponse>),
}

impl MobileError {
    pub fn token_not_found() -> Self {
        MobileError::NotFound(Json(ErrorResponse {
            error: "invalid_token".to_string(),
            message: "Invalid or expired token".to_string(),
            status_code: 404,
        }))
    }

    pub fn token_expired() -> Self {
        MobileError::BadRequest(Json(ErrorResponse {
            error: "token_expired".to_string(),
            message: "Token expired".to_string(),
            status_code: 400,
        }))
    }

    pub fn token_already_used() -> Self {
        MobileError::BadRequest(Json(ErrorResponse {
            error: "token_used".to_string(),
            message: "Token already used".to_string(),
            status_code: 400,
        }))
    }

    pub fn not_found(entity: &str) -> Self {
        MobileError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: format!("{} not found", entity),
            status_code: 404,
        }))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        MobileError::BadRequest(Json(ErrorResponse {
            error: "bad_request".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        MobileError::Internal(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: message.into(),
            status_code: 500,
        }))
    }

    pub fn message(&self) -> String {
        match self {
            MobileError::NotFound(json) => json.0.message.clone(),
            MobileError::BadRequest(json) => json.0.message.clone(),
            MobileError::Internal(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for MobileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<EntityError> for MobileError {
    fn from(err: EntityError) -> Self {
        match err {
            EntityError::NotFound(json) => MobileError::NotFound(json),
            EntityError::Validation(json) => MobileError::BadRequest(json),
            EntityError::Unauthorized(json)
            | EntityError::Forbidden(json)
            | EntityError::Internal(json) => MobileError::Internal(json),
        }
    }
}
