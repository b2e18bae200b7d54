use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::auth::AuthError;
use crate::types::dto::common::ErrorResponse;

/// Error types shared by the entity CRUD routers
#[derive(ApiResponse, Debug)]
pub enum EntityError {
    /// Record or referenced record not found
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Request failed validation (ranges, formats, duplicates)
    #[oai(status = 400)]
    Validation(Json<ErrorResponse>),

    /// Missing or invalid bearer token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Insufficient rights tier
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    Internal(Json<ErrorResponse>),
}

impl EntityError {
    /// Record with the requested id does not exist
    pub fn not_found(entity: &str) -> Self {
        EntityError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: format!("{} not found", entity),
            status_code: 404,
        }))
    }

    /// A foreign-key reference points at a missing row
    pub fn reference_not_found(entity: &str, id: i32) -> Self {
        EntityError::NotFound(Json(ErrorResponse {
            error: "reference_not_found".to_string(),
            message: format!("{} with id: {} not found", entity, id),
            status_code: 404,
        }))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        EntityError::Validation(Json(ErrorResponse {
            error: "validation_error".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn duplicate_email() -> Self {
        EntityError::Validation(Json(ErrorResponse {
            error: "duplicate_email".to_string(),
            message: "Email already registered".to_string(),
            status_code: 400,
        }))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        EntityError::Internal(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: message.into(),
            status_code: 500,
        }))
    }

    /// Wrap a database error for the given operation
    pub fn database(operation: &str, err: sea_orm::DbErr) -> Self {
        Self::internal(format!("Database error during {}: {}", operation, err))
    }

    pub fn message(&self) -> String {
        match self {
            EntityError::NotFound(json) => json.0.message.clone(),
            EntityError::Validation(json) => json.0.message.clone(),
            EntityError::Unauthorized(json) => json.0.message.clone(),
            EntityError::Forbidden(json) => json.0.message.clone(),
            EntityError::Internal(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<AuthError> for EntityError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials(json)
            | AuthError::InvalidToken(json)
            | AuthError::ExpiredToken(json) => EntityError::Unauthorized(json),
            AuthError::Forbidden(json) => EntityError::Forbidden(json),
            AuthError::DuplicateEmail(json) => EntityError::Validation(json),
            AuthError::NotFound(json) => EntityError::NotFound(json),
            AuthError::InternalError(json) => EntityError::Internal(json),
        }
    }
}
