use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::lantern;

/// Lantern row as returned by the API and export documents
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct LanternOut {
    pub id: i32,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub power: Option<i32>,
    pub height: Option<f64>,
    pub base_brightness: i32,
    pub active_brightness: i32,
    /// Mirrors active_brightness, kept for frontend compatibility
    pub brightness: Option<i32>,
    pub active_time: i32,
    pub status: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub park_id: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<lantern::Model> for LanternOut {
    fn from(l: lantern::Model) -> Self {
        Self {
            id: l.id,
            name: l.name,
            brand: l.brand,
            model: l.model,
            power: l.power,
            height: l.height,
            base_brightness: l.base_brightness,
            brightness: Some(l.active_brightness),
            active_brightness: l.active_brightness,
            active_time: l.active_time,
            status: l.status,
            latitude: l.latitude,
            longitude: l.longitude,
            park_id: l.park_id,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}
