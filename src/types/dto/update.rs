use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::update;

/// System update note as returned by the updates endpoints
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOut {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub version: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<update::Model> for UpdateOut {
    fn from(u: update::Model) -> Self {
        Self {
            id: u.id,
            title: u.title,
            content: u.content,
            version: u.version,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Request model for creating a system update note
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateCreate {
    /// Title of the update (1-255 characters)
    #[oai(validator(min_length = 1, max_length = 255))]
    pub title: String,

    /// Body text
    pub content: String,

    /// Optional version label
    pub version: Option<String>,
}

/// Request model for partially editing a system update note
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdatePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub version: Option<String>,
}
