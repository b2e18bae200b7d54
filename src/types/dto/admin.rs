use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::admin;

/// Request model for admin registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// First name (1-100 characters)
    #[oai(validator(min_length = 1, max_length = 100))]
    pub first_name: String,

    /// Surname (1-100 characters)
    #[oai(validator(min_length = 1, max_length = 100))]
    pub surname: String,

    /// Email address, unique across admins
    pub email: String,

    /// Plaintext password, hashed before storage
    pub password: String,

    /// Park this admin is responsible for
    pub park_id: Option<i32>,
}

/// Request model for admin login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

/// Response model containing the admin access token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Token type (always "bearer")
    pub token_type: String,

    /// Operation outcome flag
    pub success: bool,
}

/// Admin profile as returned by list/me endpoints
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct AdminOut {
    pub id: i32,
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub status: String,
    pub rights: String,
    pub park_id: Option<i32>,
    /// Name of the assigned park, when any
    pub park_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl AdminOut {
    pub fn from_model(admin: admin::Model, park_name: Option<String>) -> Self {
        Self {
            id: admin.id,
            first_name: admin.first_name,
            surname: admin.surname,
            email: admin.email,
            status: admin.status,
            rights: admin.rights,
            park_id: admin.park_id,
            park_name,
            created_at: admin.created_at,
        }
    }
}

/// Request model for partial self-update
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AdminUpdateRequest {
    pub first_name: Option<String>,
    pub surname: Option<String>,
    /// Park assignment; 0 clears the reference
    pub park_id: Option<i32>,
}

/// Request model for the status/rights update endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AdminStatusUpdate {
    pub status: String,
    pub rights: String,
}
