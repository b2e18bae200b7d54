use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::user_message;

/// Response model for QR pairing token generation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct QrAuthToken {
    /// One-time pairing token
    pub token: String,

    /// QR code rendering of the pairing payload (base64-encoded SVG)
    pub qr_code_base64: String,

    /// Expiry of the pairing token
    pub expires_at: DateTime<Utc>,
}

/// Request model for QR token validation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AuthTokenValidation {
    pub token: String,
}

/// Response model for a successful QR token exchange
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MobileAccessToken {
    /// Opaque long-lived access token
    pub access_token: String,

    /// Token type (always "bearer")
    pub token_type: String,

    /// Lifetime of the access token in seconds
    pub expires_in: i64,

    pub message: String,
}

/// Current state of a lantern for the mobile map/list view
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LanternStatusOut {
    pub id: i32,
    pub status: String,
    pub active_brightness: i32,
    pub base_brightness: i32,
    pub park_id: Option<i32>,
    /// Time of the last sensor response, if any
    pub last_response: Option<DateTime<Utc>>,
}

/// Breakdown entry for mobile notifications and history
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct BreakdownNotification {
    pub id: i32,
    pub lantern_id: i32,
    pub date: DateTime<Utc>,
    pub description: Option<String>,
    pub is_resolved: bool,
}

/// Remote-control request for a single lantern
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ControlRequest {
    pub lantern_id: i32,

    /// One of "turn_on", "turn_off", "set_brightness"
    pub action: String,

    /// Brightness percentage, required for set_brightness
    pub brightness: Option<i32>,
}

/// Issue report submitted from the mobile app
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MessageRequest {
    /// Title of the report (1-200 characters)
    #[oai(validator(min_length = 1, max_length = 200))]
    pub title: String,

    pub description: String,

    pub location: Option<String>,

    /// Optional photo, base64-encoded
    pub photo_base64: Option<String>,

    /// low | medium | high | critical
    pub priority: Option<String>,
}

/// Stored user message as returned to the mobile app
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MessageOut {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub location: Option<String>,
    pub photo_url: Option<String>,
    pub priority: String,
    pub status: String,
}

impl From<user_message::Model> for MessageOut {
    fn from(m: user_message::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            created_at: m.created_at,
            location: m.location,
            photo_url: m.photo_url,
            priority: m.priority,
            status: m.status,
        }
    }
}

/// Acknowledgement for push-notification device registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DeviceRegistration {
    pub message: String,
    pub token: String,
}
