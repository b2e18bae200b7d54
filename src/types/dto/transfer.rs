use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::dto::activity::ActivityOut;
use crate::types::dto::admin::AdminOut;
use crate::types::dto::breakdown::BreakdownOut;
use crate::types::dto::company::CompanyOut;
use crate::types::dto::lantern::LanternOut;
use crate::types::dto::park::ParkOut;
use crate::types::dto::renovation::RenovationOut;
use crate::types::dto::repairman::RepairmanOut;

/// Metadata attached to every export document
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ExportInfo {
    pub timestamp: DateTime<Utc>,
    pub exported_by: String,
    pub format: String,
    pub total_records: i64,
}

/// All exported tables plus metadata
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ExportData {
    pub lanterns: Vec<LanternOut>,
    pub parks: Vec<ParkOut>,
    pub breakdowns: Vec<BreakdownOut>,
    pub renovations: Vec<RenovationOut>,
    pub repairmen: Vec<RepairmanOut>,
    pub companies: Vec<CompanyOut>,
    pub export_info: ExportInfo,
}

/// Envelope returned by the JSON export endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ExportResponse {
    pub data: ExportData,
    pub format: String,
    pub success: bool,
}

/// Metadata attached to every backup document
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct BackupInfo {
    pub timestamp: DateTime<Utc>,
    pub created_by: String,
    pub version: String,
    pub total_records: i64,
}

/// Full dump of every table, admins included (without password hashes)
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct BackupData {
    pub admins: Vec<AdminOut>,
    pub lanterns: Vec<LanternOut>,
    pub parks: Vec<ParkOut>,
    pub breakdowns: Vec<BreakdownOut>,
    pub renovations: Vec<RenovationOut>,
    pub repairmen: Vec<RepairmanOut>,
    pub companies: Vec<CompanyOut>,
    pub activities: Vec<ActivityOut>,
    pub backup_info: BackupInfo,
}

/// Envelope returned by the backup endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct BackupResponse {
    pub data: BackupData,
    pub name: String,
    pub filename: String,
    pub success: bool,
}

/// Per-table counters of successfully imported rows
#[derive(Object, Debug, Default, Serialize, Deserialize)]
pub struct ImportCounts {
    pub lanterns: i32,
    pub parks: i32,
    pub breakdowns: i32,
    pub renovations: i32,
    pub repairmen: i32,
    pub companies: i32,
}

/// Envelope returned by the import endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ImportResponse {
    pub message: String,
    pub imported_counts: ImportCounts,
    pub success: bool,
}
