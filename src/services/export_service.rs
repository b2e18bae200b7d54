use chrono::{DateTime, Utc};
use rust_xlsxwriter::Workbook;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;

use crate::errors::transfer::TransferError;
use crate::services::ActivityLogger;
use crate::types::db::{admin, breakdown, company, database_activity, lantern, park, renovation, repairman};
use crate::types::dto::activity::ActivityOut;
use crate::types::dto::admin::AdminOut;
use crate::types::dto::breakdown::BreakdownOut;
use crate::types::dto::company::CompanyOut;
use crate::types::dto::lantern::LanternOut;
use crate::types::dto::park::ParkOut;
use crate::types::dto::renovation::RenovationOut;
use crate::types::dto::repairman::RepairmanOut;
use crate::types::dto::transfer::{
    BackupData, BackupInfo, BackupResponse, ExportData, ExportInfo, ExportResponse, ImportCounts,
};
use crate::types::internal::activity::{ActivityType, NewActivity};

/// Full-table export, backup and best-effort import
///
/// Export reads degrade per table: a failing table becomes an empty list
/// instead of failing the whole document. Import degrades per row: one bad
/// row never aborts the batch, and nothing is wrapped in a transaction.
pub struct ExportService {
    db: DatabaseConnection,
    activity_logger: Arc<ActivityLogger>,
}

impl ExportService {
    pub fn new(db: DatabaseConnection, activity_logger: Arc<ActivityLogger>) -> Self {
        Self { db, activity_logger }
    }

    /// Build the JSON export document
    pub async fn export_json(&self, exported_by: &str) -> ExportResponse {
        let lanterns: Vec<LanternOut> = self
            .load_all::<lantern::Entity>("lanterns")
            .await
            .into_iter()
            .map(Into::into)
            .collect();
        let parks: Vec<ParkOut> = self
            .load_all::<park::Entity>("parks")
            .await
            .into_iter()
            .map(Into::into)
            .collect();
        let breakdowns: Vec<BreakdownOut> = self
            .load_all::<breakdown::Entity>("breakdowns")
            .await
            .into_iter()
            .map(Into::into)
            .collect();
        let renovations: Vec<RenovationOut> = self
            .load_all::<renovation::Entity>("renovations")
            .await
            .into_iter()
            .map(Into::into)
            .collect();
        let repairmen: Vec<RepairmanOut> = self
            .load_all::<repairman::Entity>("repairmen")
            .await
            .into_iter()
            .map(Into::into)
            .collect();
        let companies: Vec<CompanyOut> = self
            .load_all::<company::Entity>("companies")
            .await
            .into_iter()
            .map(Into::into)
            .collect();

        let total_records = (lanterns.len()
            + parks.len()
            + breakdowns.len()
            + renovations.len()
            + repairmen.len()
            + companies.len()) as i64;

        self.activity_logger
            .log(
                NewActivity::new(ActivityType::DataExport, "system", "Exported system data as JSON")
                    .details(format!("{{\"format\":\"json\",\"records_count\":{}}}", total_records))
                    .performed_by(exported_by),
            )
            .await;

        ExportResponse {
            data: ExportData {
                lanterns,
                parks,
                breakdowns,
                renovations,
                repairmen,
                companies,
                export_info: ExportInfo {
                    timestamp: Utc::now(),
                    exported_by: exported_by.to_string(),
                    format: "json".to_string(),
                    total_records,
                },
            },
            format: "json".to_string(),
            success: true,
        }
    }

    /// Build the full backup document, admins and activities included
    pub async fn backup(&self, created_by: &str) -> BackupResponse {
        let admins: Vec<AdminOut> = self
            .load_all::<admin::Entity>("admins")
            .await
            .into_iter()
            .map(|a| AdminOut::from_model(a, None))
            .collect();
        let lanterns: Vec<LanternOut> = self
            .load_all::<lantern::Entity>("lanterns")
            .await
            .into_iter()
            .map(Into::into)
            .collect();
        let parks: Vec<ParkOut> = self
            .load_all::<park::Entity>("parks")
            .await
            .into_iter()
            .map(Into::into)
            .collect();
        let breakdowns: Vec<BreakdownOut> = self
            .load_all::<breakdown::Entity>("breakdowns")
            .await
            .into_iter()
            .map(Into::into)
            .collect();
        let renovations: Vec<RenovationOut> = self
            .load_all::<renovation::Entity>("renovations")
            .await
            .into_iter()
            .map(Into::into)
            .collect();
        let repairmen: Vec<RepairmanOut> = self
            .load_all::<repairman::Entity>("repairmen")
            .await
            .into_iter()
            .map(Into::into)
            .collect();
        let companies: Vec<CompanyOut> = self
            .load_all::<company::Entity>("companies")
            .await
            .into_iter()
            .map(Into::into)
            .collect();
        let activities: Vec<ActivityOut> = self
            .load_all::<database_activity::Entity>("activities")
            .await
            .into_iter()
            .map(Into::into)
            .collect();

        let total_records = (admins.len()
            + lanterns.len()
            + parks.len()
            + breakdowns.len()
            + renovations.len()
            + repairmen.len()
            + companies.len()) as i64;

        self.activity_logger
            .log(
                NewActivity::new(ActivityType::BackupCreated, "system", "Created full system backup")
                    .details(format!("{{\"total_records\":{}}}", total_records))
                    .performed_by(created_by),
            )
            .await;

        let timestamp = Utc::now();
        let name = format!("smartlighting_backup_{}", timestamp.format("%Y%m%d_%H%M%S"));

        BackupResponse {
            data: BackupData {
                admins,
                lanterns,
                parks,
                breakdowns,
                renovations,
                repairmen,
                companies,
                activities,
                backup_info: BackupInfo {
                    timestamp,
                    created_by: created_by.to_string(),
                    version: "1.0".to_string(),
                    total_records,
                },
            },
            filename: format!("{}.json", name),
            name,
            success: true,
        }
    }

    /// Build the spreadsheet export: one sheet per non-empty table plus an
    /// info sheet
    pub async fn export_excel(&self, exported_by: &str) -> Result<Vec<u8>, TransferError> {
        let lanterns = self.load_all::<lantern::Entity>("lanterns").await;
        let parks = self.load_all::<park::Entity>("parks").await;
        let breakdowns = self.load_all::<breakdown::Entity>("breakdowns").await;
        let renovations = self.load_all::<renovation::Entity>("renovations").await;
        let repairmen = self.load_all::<repairman::Entity>("repairmen").await;
        let companies = self.load_all::<company::Entity>("companies").await;

        let mut workbook = Workbook::new();

        if !lanterns.is_empty() {
            let sheet = workbook.add_worksheet();
            sheet
                .set_name("Lanterns")
                .map_err(|e| TransferError::internal(format!("Excel export failed: {}", e)))?;
            let headers = [
                "ID", "Name", "Park ID", "Brand", "Model", "Power", "Height", "Status",
                "Base brightness", "Active brightness", "Active time", "Latitude", "Longitude",
                "Created", "Updated",
            ];
            write_headers(sheet, &headers)?;
            for (i, l) in lanterns.iter().enumerate() {
                let row = (i + 1) as u32;
                write_cell(sheet, row, 0, l.id)?;
                write_opt_string(sheet, row, 1, l.name.as_deref())?;
                write_opt_i32(sheet, row, 2, l.park_id)?;
                write_opt_string(sheet, row, 3, l.brand.as_deref())?;
                write_opt_string(sheet, row, 4, l.model.as_deref())?;
                write_opt_i32(sheet, row, 5, l.power)?;
                write_opt_f64(sheet, row, 6, l.height)?;
                write_cell(sheet, row, 7, l.status.as_str())?;
                write_cell(sheet, row, 8, l.base_brightness)?;
                write_cell(sheet, row, 9, l.active_brightness)?;
                write_cell(sheet, row, 10, l.active_time)?;
                write_opt_f64(sheet, row, 11, l.latitude)?;
                write_opt_f64(sheet, row, 12, l.longitude)?;
                write_opt_timestamp(sheet, row, 13, l.created_at)?;
                write_opt_timestamp(sheet, row, 14, l.updated_at)?;
            }
        }

        if !parks.is_empty() {
            let sheet = workbook.add_worksheet();
            sheet
                .set_name("Parks")
                .map_err(|e| TransferError::internal(format!("Excel export failed: {}", e)))?;
            write_headers(sheet, &["ID", "Name", "Address", "Latitude", "Longitude", "Created", "Updated"])?;
            for (i, p) in parks.iter().enumerate() {
                let row = (i + 1) as u32;
                write_cell(sheet, row, 0, p.id)?;
                write_cell(sheet, row, 1, p.name.as_str())?;
                write_cell(sheet, row, 2, p.address.as_str())?;
                write_opt_f64(sheet, row, 3, p.latitude)?;
                write_opt_f64(sheet, row, 4, p.longitude)?;
                write_opt_timestamp(sheet, row, 5, p.created_at)?;
                write_opt_timestamp(sheet, row, 6, p.updated_at)?;
            }
        }

        if !breakdowns.is_empty() {
            let sheet = workbook.add_worksheet();
            sheet
                .set_name("Breakdowns")
                .map_err(|e| TransferError::internal(format!("Excel export failed: {}", e)))?;
            write_headers(sheet, &["ID", "Lantern ID", "Description", "Status", "Priority", "Reported", "Fixed"])?;
            for (i, b) in breakdowns.iter().enumerate() {
                let row = (i + 1) as u32;
                write_cell(sheet, row, 0, b.id)?;
                write_cell(sheet, row, 1, b.lantern_id)?;
                write_opt_string(sheet, row, 2, b.description.as_deref())?;
                write_cell(sheet, row, 3, b.status.as_str())?;
                write_cell(sheet, row, 4, b.priority.as_str())?;
                write_opt_timestamp(sheet, row, 5, Some(b.reported_at))?;
                write_opt_timestamp(sheet, row, 6, b.fixed_at)?;
            }
        }

        if !renovations.is_empty() {
            let sheet = workbook.add_worksheet();
            sheet
                .set_name("Renovations")
                .map_err(|e| TransferError::internal(format!("Excel export failed: {}", e)))?;
            write_headers(sheet, &["ID", "Lantern ID", "Repairman ID", "Description", "Status", "Cost", "Start", "End"])?;
            for (i, r) in renovations.iter().enumerate() {
                let row = (i + 1) as u32;
                write_cell(sheet, row, 0, r.id)?;
                write_opt_i32(sheet, row, 1, r.lantern_id)?;
                write_opt_i32(sheet, row, 2, r.repairman_id)?;
                write_opt_string(sheet, row, 3, r.description.as_deref())?;
                write_cell(sheet, row, 4, r.status.as_str())?;
                write_cell(sheet, row, 5, r.cost)?;
                write_opt_timestamp(sheet, row, 6, r.start_date)?;
                write_opt_timestamp(sheet, row, 7, r.end_date)?;
            }
        }

        if !repairmen.is_empty() {
            let sheet = workbook.add_worksheet();
            sheet
                .set_name("Repairmen")
                .map_err(|e| TransferError::internal(format!("Excel export failed: {}", e)))?;
            write_headers(sheet, &["ID", "First name", "Surname", "Phone", "Email", "Company ID"])?;
            for (i, r) in repairmen.iter().enumerate() {
                let row = (i + 1) as u32;
                write_cell(sheet, row, 0, r.id)?;
                write_opt_string(sheet, row, 1, r.first_name.as_deref())?;
                write_opt_string(sheet, row, 2, r.surname.as_deref())?;
                write_opt_string(sheet, row, 3, r.phone.as_deref())?;
                write_opt_string(sheet, row, 4, r.email.as_deref())?;
                write_opt_i32(sheet, row, 5, r.company_id)?;
            }
        }

        if !companies.is_empty() {
            let sheet = workbook.add_worksheet();
            sheet
                .set_name("Companies")
                .map_err(|e| TransferError::internal(format!("Excel export failed: {}", e)))?;
            write_headers(sheet, &["ID", "Name", "Address", "Phone", "Email"])?;
            for (i, c) in companies.iter().enumerate() {
                let row = (i + 1) as u32;
                write_cell(sheet, row, 0, c.id)?;
                write_opt_string(sheet, row, 1, c.name.as_deref())?;
                write_opt_string(sheet, row, 2, c.address.as_deref())?;
                write_opt_string(sheet, row, 3, c.phone.as_deref())?;
                write_opt_string(sheet, row, 4, c.email.as_deref())?;
            }
        }

        let info = workbook.add_worksheet();
        info.set_name("Info")
            .map_err(|e| TransferError::internal(format!("Excel export failed: {}", e)))?;
        write_headers(info, &["Parameter", "Value"])?;
        write_cell(info, 1, 0, "Export date")?;
        write_cell(info, 1, 1, Utc::now().format("%Y-%m-%d %H:%M:%S").to_string().as_str())?;
        write_cell(info, 2, 0, "Exported by")?;
        write_cell(info, 2, 1, exported_by)?;
        let counts: [(&str, usize); 6] = [
            ("Lanterns", lanterns.len()),
            ("Parks", parks.len()),
            ("Breakdowns", breakdowns.len()),
            ("Renovations", renovations.len()),
            ("Repairmen", repairmen.len()),
            ("Companies", companies.len()),
        ];
        for (i, (label, count)) in counts.iter().enumerate() {
            let row = (i + 3) as u32;
            write_cell(info, row, 0, *label)?;
            write_cell(info, row, 1, *count as i32)?;
        }

        let total_records = counts.iter().map(|(_, c)| *c).sum::<usize>() as i64;
        self.activity_logger
            .log(
                NewActivity::new(ActivityType::DataExport, "system", "Exported system data as Excel")
                    .details(format!("{{\"format\":\"excel\",\"records_count\":{}}}", total_records))
                    .performed_by(exported_by),
            )
            .await;

        workbook
            .save_to_buffer()
            .map_err(|e| TransferError::internal(format!("Excel export failed: {}", e)))
    }

    /// Import a previously exported document, insert-if-absent by id
    ///
    /// Accepts either a full export/backup envelope (with a `data` key) or the
    /// bare tables object. Rows that fail to decode or insert are skipped with
    /// a warning.
    pub async fn import(&self, document: serde_json::Value, performed_by: &str) -> Result<ImportCounts, TransferError> {
        let tables = match document.get("data") {
            Some(data) => data.clone(),
            None => document,
        };

        if !tables.is_object() {
            return Err(TransferError::invalid_payload("Expected a JSON object of tables"));
        }

        let mut counts = ImportCounts::default();

        // Parks and companies first, as other entities reference them
        if let Some(rows) = tables.get("parks").and_then(|v| v.as_array()) {
            for row in rows {
                let parsed: ParkOut = match serde_json::from_value(row.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        tracing::warn!("skipping park row: {}", e);
                        continue;
                    }
                };
                if self.row_exists::<park::Entity>(parsed.id, "park").await {
                    continue;
                }
                let inserted = park::ActiveModel {
                    id: Set(parsed.id),
                    name: Set(parsed.name),
                    address: Set(parsed.address),
                    latitude: Set(parsed.latitude),
                    longitude: Set(parsed.longitude),
                    created_at: Set(parsed.created_at),
                    updated_at: Set(parsed.updated_at),
                }
                .insert(&self.db)
                .await;
                match inserted {
                    Ok(_) => counts.parks += 1,
                    Err(e) => tracing::warn!("could not import park {}: {}", parsed.id, e),
                }
            }
        }

        if let Some(rows) = tables.get("companies").and_then(|v| v.as_array()) {
            for row in rows {
                let parsed: CompanyOut = match serde_json::from_value(row.clone()) {
                    Ok(c) => c,
                    Err(e) => {
                        tracing::warn!("skipping company row: {}", e);
                        continue;
                    }
                };
                if self.row_exists::<company::Entity>(parsed.id, "company").await {
                    continue;
                }
                let inserted = company::ActiveModel {
                    id: Set(parsed.id),
                    name: Set(parsed.name),
                    address: Set(parsed.address),
                    phone: Set(parsed.phone),
                    email: Set(parsed.email),
                    notes: Set(parsed.notes),
                }
                .insert(&self.db)
                .await;
                match inserted {
                    Ok(_) => counts.companies += 1,
                    Err(e) => tracing::warn!("could not import company {}: {}", parsed.id, e),
                }
            }
        }

        if let Some(rows) = tables.get("repairmen").and_then(|v| v.as_array()) {
            for row in rows {
                let parsed: RepairmanOut = match serde_json::from_value(row.clone()) {
                    Ok(r) => r,
                    Err(e) => {
                        tracing::warn!("skipping repairman row: {}", e);
                        continue;
                    }
                };
                if self.row_exists::<repairman::Entity>(parsed.id, "repairman").await {
                    continue;
                }
                let inserted = repairman::ActiveModel {
                    id: Set(parsed.id),
                    first_name: Set(parsed.first_name),
                    surname: Set(parsed.surname),
                    email: Set(parsed.email),
                    phone: Set(parsed.phone),
                    specialization: Set(parsed.specialization),
                    company_id: Set(parsed.company_id),
                }
                .insert(&self.db)
                .await;
                match inserted {
                    Ok(_) => counts.repairmen += 1,
                    Err(e) => tracing::warn!("could not import repairman {}: {}", parsed.id, e),
                }
            }
        }

        if let Some(rows) = tables.get("lanterns").and_then(|v| v.as_array()) {
            for row in rows {
                let parsed: LanternOut = match serde_json::from_value(row.clone()) {
                    Ok(l) => l,
                    Err(e) => {
                        tracing::warn!("skipping lantern row: {}", e);
                        continue;
                    }
                };
                if self.row_exists::<lantern::Entity>(parsed.id, "lantern").await {
                    continue;
                }
                let inserted = lantern::ActiveModel {
                    id: Set(parsed.id),
                    name: Set(parsed.name),
                    brand: Set(parsed.brand),
                    model: Set(parsed.model),
                    power: Set(parsed.power),
                    height: Set(parsed.height),
                    base_brightness: Set(parsed.base_brightness),
                    active_brightness: Set(parsed.active_brightness),
                    active_time: Set(parsed.active_time),
                    status: Set(parsed.status),
                    latitude: Set(parsed.latitude),
                    longitude: Set(parsed.longitude),
                    park_id: Set(parsed.park_id),
                    created_at: Set(parsed.created_at),
                    updated_at: Set(parsed.updated_at),
                }
                .insert(&self.db)
                .await;
                match inserted {
                    Ok(_) => counts.lanterns += 1,
                    Err(e) => tracing::warn!("could not import lantern {}: {}", parsed.id, e),
                }
            }
        }

        if let Some(rows) = tables.get("breakdowns").and_then(|v| v.as_array()) {
            for row in rows {
                let parsed: BreakdownOut = match serde_json::from_value(row.clone()) {
                    Ok(b) => b,
                    Err(e) => {
                        tracing::warn!("skipping breakdown row: {}", e);
                        continue;
                    }
                };
                if self.row_exists::<breakdown::Entity>(parsed.id, "breakdown").await {
                    continue;
                }
                let inserted = breakdown::ActiveModel {
                    id: Set(parsed.id),
                    lantern_id: Set(parsed.lantern_id),
                    description: Set(parsed.description),
                    status: Set(parsed.status),
                    priority: Set(parsed.priority),
                    reported_at: Set(parsed.reported_at),
                    fixed_at: Set(parsed.fixed_at),
                }
                .insert(&self.db)
                .await;
                match inserted {
                    Ok(_) => counts.breakdowns += 1,
                    Err(e) => tracing::warn!("could not import breakdown {}: {}", parsed.id, e),
                }
            }
        }

        if let Some(rows) = tables.get("renovations").and_then(|v| v.as_array()) {
            for row in rows {
                let parsed: RenovationOut = match serde_json::from_value(row.clone()) {
                    Ok(r) => r,
                    Err(e) => {
                        tracing::warn!("skipping renovation row: {}", e);
                        continue;
                    }
                };
                if self.row_exists::<renovation::Entity>(parsed.id, "renovation").await {
                    continue;
                }
                let inserted = renovation::ActiveModel {
                    id: Set(parsed.id),
                    lantern_id: Set(parsed.lantern_id),
                    repairman_id: Set(parsed.repairman_id),
                    description: Set(parsed.description),
                    status: Set(parsed.status),
                    priority: Set(parsed.priority),
                    cost: Set(parsed.cost),
                    start_date: Set(parsed.start_date),
                    end_date: Set(parsed.end_date),
                }
                .insert(&self.db)
                .await;
                match inserted {
                    Ok(_) => counts.renovations += 1,
                    Err(e) => tracing::warn!("could not import renovation {}: {}", parsed.id, e),
                }
            }
        }

        let imported_total = counts.lanterns
            + counts.parks
            + counts.breakdowns
            + counts.renovations
            + counts.repairmen
            + counts.companies;
        self.activity_logger
            .log(
                NewActivity::new(ActivityType::DataImport, "system", "Imported data from file")
                    .details(format!("{{\"imported_rows\":{}}}", imported_total))
                    .performed_by(performed_by),
            )
            .await;

        Ok(counts)
    }

    async fn load_all<E>(&self, label: &str) -> Vec<E::Model>
    where
        E: EntityTrait,
    {
        match E::find().all(&self.db).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("could not load {} for export: {}", label, e);
                Vec::new()
            }
        }
    }

    async fn row_exists<E>(&self, id: i32, label: &str) -> bool
    where
        E: EntityTrait,
        E::PrimaryKey: sea_orm::PrimaryKeyTrait<ValueType = i32>,
    {
        match E::find_by_id(id).one(&self.db).await {
            Ok(existing) => existing.is_some(),
            Err(e) => {
                // Treat lookup failures as "exists" so the row is skipped
                tracing::warn!("could not check existing {} {}: {}", label, id, e);
                true
            }
        }
    }
}

type Sheet = rust_xlsxwriter::Worksheet;

fn write_headers(sheet: &mut Sheet, headers: &[&str]) -> Result<(), TransferError> {
    for (col, header) in headers.iter().enumerate() {
        write_cell(sheet, 0, col as u16, *header)?;
    }
    Ok(())
}

fn write_cell<T>(sheet: &mut Sheet, row: u32, col: u16, value: T) -> Result<(), TransferError>
where
    T: rust_xlsxwriter::IntoExcelData,
{
    sheet
        .write(row, col, value)
        .map_err(|e| TransferError::internal(format!("Excel export failed: {}", e)))?;
    Ok(())
}

fn write_opt_string(sheet: &mut Sheet, row: u32, col: u16, value: Option<&str>) -> Result<(), TransferError> {
    if let Some(v) = value {
        write_cell(sheet, row, col, v)?;
    }
    Ok(())
}

fn write_opt_i32(sheet: &mut Sheet, row: u32, col: u16, value: Option<i32>) -> Result<(), TransferError> {
    if let Some(v) = value {
        write_cell(sheet, row, col, v)?;
    }
    Ok(())
}

fn write_opt_f64(sheet: &mut Sheet, row: u32, col: u16, value: Option<f64>) -> Result<(), TransferError> {
    if let Some(v) = value {
        write_cell(sheet, row, col, v)?;
    }
    Ok(())
}

fn write_opt_timestamp(sheet: &mut Sheet, row: u32, col: u16, value: Option<DateTime<Utc>>) -> Result<(), TransferError> {
    if let Some(v) = value {
        write_cell(sheet, row, col, v.format("%Y-%m-%d %H:%M:%S").to_string().as_str())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::ActivityStore;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, PaginatorTrait};
    use serde_json::json;

    async fn setup_service() -> ExportService {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let activity_logger = Arc::new(ActivityLogger::new(Arc::new(ActivityStore::new(db.clone()))));
        ExportService::new(db, activity_logger)
    }

    #[tokio::test]
    async fn test_export_with_empty_tables() {
        let service = setup_service().await;

        let document = service.export_json("admin@test.com").await;

        assert!(document.success);
        assert!(document.data.lanterns.is_empty());
        assert!(document.data.parks.is_empty());
        assert!(document.data.breakdowns.is_empty());
        assert!(document.data.renovations.is_empty());
        assert!(document.data.repairmen.is_empty());
        assert!(document.data.companies.is_empty());
        assert_eq!(document.data.export_info.total_records, 0);
        assert_eq!(document.data.export_info.exported_by, "admin@test.com");
        // A concrete timestamp is always present
        assert!(document.data.export_info.timestamp <= Utc::now());
    }

    #[tokio::test]
    async fn test_import_counts_and_skips_existing() {
        let service = setup_service().await;

        let payload = json!({
            "data": {
                "parks": [
                    {"id": 1, "name": "Central", "address": "Main St 1"},
                    {"id": 2, "name": "Riverside", "address": "Quay 3"}
                ],
                "lanterns": [
                    {"id": 1, "park_id": 1, "base_brightness": 50, "active_brightness": 100,
                     "active_time": 30, "status": "working"}
                ]
            }
        });

        let counts = service.import(payload.clone(), "admin@test.com").await.unwrap();
        assert_eq!(counts.parks, 2);
        assert_eq!(counts.lanterns, 1);

        // Importing the same document again inserts nothing
        let again = service.import(payload, "admin@test.com").await.unwrap();
        assert_eq!(again.parks, 0);
        assert_eq!(again.lanterns, 0);

        let park_count = park::Entity::find().count(&service.db).await.unwrap();
        assert_eq!(park_count, 2);
    }

    #[tokio::test]
    async fn test_import_isolates_bad_rows() {
        let service = setup_service().await;

        let payload = json!({
            "parks": [
                {"id": "garbage"},
                {"id": 5, "name": "Central", "address": "Main St 1"}
            ]
        });

        let counts = service.import(payload, "admin@test.com").await.unwrap();

        assert_eq!(counts.parks, 1);
    }

    #[tokio::test]
    async fn test_import_rejects_non_object_payload() {
        let service = setup_service().await;

        let result = service.import(json!([1, 2, 3]), "admin@test.com").await;

        assert!(matches!(result, Err(TransferError::InvalidPayload(_))));
    }

    #[tokio::test]
    async fn test_export_excel_produces_workbook_bytes() {
        let service = setup_service().await;

        let bytes = service.export_excel("admin@test.com").await.unwrap();

        // XLSX containers start with the PK zip magic
        assert_eq!(&bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn test_round_trip_export_import() {
        let service = setup_service().await;

        let seed = json!({
            "parks": [{"id": 1, "name": "Central", "address": "Main St 1"}],
            "companies": [{"id": 1, "name": "Lightfix", "email": "ops@lightfix.example"}],
            "repairmen": [{"id": 1, "first_name": "Ivan", "surname": "Koval",
                            "email": "ivan@example.com", "company_id": 1}]
        });
        service.import(seed, "admin@test.com").await.unwrap();

        let document = service.export_json("admin@test.com").await;
        assert_eq!(document.data.parks.len(), 1);
        assert_eq!(document.data.companies.len(), 1);
        assert_eq!(document.data.repairmen.len(), 1);
        assert_eq!(document.data.export_info.total_records, 3);
    }
}
