use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// One row from get_top_activated_lanterns
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TopActivatedLantern {
    pub id: i32,
    pub activation_count: i64,
}

/// One row from get_lanterns_needing_renovation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LanternNeedingRenovation {
    pub id: i32,
    pub last_renovation_date: Option<DateTime<Utc>>,
}

/// One row from get_planned_renovations
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PlannedRenovation {
    pub id: i32,
    pub lantern_id: i32,
    pub date: DateTime<Utc>,
}

/// Aggregate statistics for one park
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub top_activated_lanterns: Vec<TopActivatedLantern>,
    pub lanterns_needing_renovation: Vec<LanternNeedingRenovation>,
    pub planned_renovations: Vec<PlannedRenovation>,
}
