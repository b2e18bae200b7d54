use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::park;

/// Park row as returned by the API and export documents
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ParkOut {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<park::Model> for ParkOut {
    fn from(p: park::Model) -> Self {
        Self {
            id: p.id,
            name: p.name,
            address: p.address,
            latitude: p.latitude,
            longitude: p.longitude,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Minimal park reference for the registration dropdown
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ParkRef {
    pub id: i32,
    pub name: String,
}

impl From<park::Model> for ParkRef {
    fn from(p: park::Model) -> Self {
        Self { id: p.id, name: p.name }
    }
}
