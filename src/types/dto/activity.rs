use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::database_activity;

/// Audit trail row as returned by the activities endpoints and backups
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ActivityOut {
    pub id: i32,
    pub activity_type: String,
    pub entity_type: String,
    pub entity_id: Option<i32>,
    pub description: String,
    pub details: Option<String>,
    pub performed_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<database_activity::Model> for ActivityOut {
    fn from(a: database_activity::Model) -> Self {
        Self {
            id: a.id,
            activity_type: a.activity_type,
            entity_type: a.entity_type,
            entity_id: a.entity_id,
            description: a.description,
            details: a.details,
            performed_by: a.performed_by,
            created_at: a.created_at,
        }
    }
}
