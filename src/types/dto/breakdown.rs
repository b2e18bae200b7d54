use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::breakdown;

/// Breakdown row as returned by the API and export documents
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownOut {
    pub id: i32,
    pub lantern_id: i32,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub reported_at: DateTime<Utc>,
    pub fixed_at: Option<DateTime<Utc>>,
}

impl From<breakdown::Model> for BreakdownOut {
    fn from(b: breakdown::Model) -> Self {
        Self {
            id: b.id,
            lantern_id: b.lantern_id,
            description: b.description,
            status: b.status,
            priority: b.priority,
            reported_at: b.reported_at,
            fixed_at: b.fixed_at,
        }
    }
}
