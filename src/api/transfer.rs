use chrono::Utc;
use poem_openapi::{param::Query, payload::Attachment, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{current_admin, BearerAuth};
use crate::app_data::AppData;
use crate::errors::transfer::TransferError;
use crate::types::dto::transfer::{BackupResponse, ExportResponse, ImportResponse};

/// Data export, backup and import endpoints, mounted under /admin
pub struct TransferApi {
    app_data: Arc<AppData>,
}

impl TransferApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for transfer endpoints
#[derive(Tags)]
enum TransferTags {
    /// Export, backup and import
    Transfer,
}

#[OpenApi(prefix_path = "/admin")]
impl TransferApi {
    /// Export all entity tables as a JSON document
    ///
    /// Tables that fail to load degrade to empty arrays rather than failing
    /// the whole export.
    #[oai(path = "/export", method = "post", tag = "TransferTags::Transfer")]
    async fn export(
        &self,
        auth: BearerAuth,
        export_format: Query<Option<String>>,
    ) -> Result<Json<ExportResponse>, TransferError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        // Only the JSON shape is produced here; the parameter is echoed back
        let format = export_format.0.unwrap_or_else(|| "json".to_string());
        let mut document = self.app_data.export_service.export_json(&admin.email).await;
        document.format = format.clone();
        document.data.export_info.format = format;

        Ok(Json(document))
    }

    /// Export all entity tables as an Excel workbook
    #[oai(path = "/export/excel", method = "post", tag = "TransferTags::Transfer")]
    async fn export_excel(&self, auth: BearerAuth) -> Result<Attachment<Vec<u8>>, TransferError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        let bytes = self.app_data.export_service.export_excel(&admin.email).await?;
        let filename = format!(
            "smartlighting_export_{}.xlsx",
            Utc::now().format("%Y%m%d_%H%M%S")
        );

        Ok(Attachment::new(bytes).filename(filename))
    }

    /// Create a full backup document including admins and the audit trail
    #[oai(path = "/backup", method = "post", tag = "TransferTags::Transfer")]
    async fn backup(&self, auth: BearerAuth) -> Result<Json<BackupResponse>, TransferError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        Ok(Json(self.app_data.export_service.backup(&admin.email).await))
    }

    /// Import a previously exported JSON document
    ///
    /// Rows are inserted only when their id is absent; one bad row never
    /// aborts the batch. Returns per-table counts of imported rows.
    #[oai(path = "/import", method = "post", tag = "TransferTags::Transfer")]
    async fn import(
        &self,
        auth: BearerAuth,
        body: Json<serde_json::Value>,
    ) -> Result<Json<ImportResponse>, TransferError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        let imported_counts = self.app_data.export_service.import(body.0, &admin.email).await?;

        Ok(Json(ImportResponse {
            message: "Data imported successfully".to_string(),
            imported_counts,
            success: true,
        }))
    }
}
