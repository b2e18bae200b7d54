use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::renovation;

/// Renovation row as returned by the API and export documents
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct RenovationOut {
    pub id: i32,
    pub lantern_id: Option<i32>,
    pub repairman_id: Option<i32>,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub cost: i32,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl From<renovation::Model> for RenovationOut {
    fn from(r: renovation::Model) -> Self {
        Self {
            id: r.id,
            lantern_id: r.lantern_id,
            repairman_id: r.repairman_id,
            description: r.description,
            status: r.status,
            priority: r.priority,
            cost: r.cost,
            start_date: r.start_date,
            end_date: r.end_date,
        }
    }
}
