use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{current_admin, BearerAuth};
use crate::app_data::AppData;
use crate::errors::entity::EntityError;
use crate::stores::repairman_store::{NewRepairman, RepairmanChanges};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::repairman::RepairmanOut;

/// Repairman CRUD endpoints
pub struct RepairmanApi {
    app_data: Arc<AppData>,
}

impl RepairmanApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for repairman endpoints
#[derive(Tags)]
enum RepairmanTags {
    /// Repairman management
    Repairman,
}

#[OpenApi(prefix_path = "/repairman")]
impl RepairmanApi {
    /// Create a new repairman
    ///
    /// The email must be unused; the company reference, when given, must
    /// exist.
    #[oai(path = "/add", method = "post", tag = "RepairmanTags::Repairman")]
    async fn add(
        &self,
        auth: BearerAuth,
        first_name: Query<String>,
        surname: Query<String>,
        email: Query<String>,
        company_id: Query<Option<i32>>,
    ) -> Result<Json<MessageResponse>, EntityError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        self.app_data
            .repairman_store
            .create(
                NewRepairman {
                    first_name: first_name.0,
                    surname: surname.0,
                    email: email.0,
                    company_id: company_id.0,
                },
                &admin.email,
            )
            .await?;

        Ok(Json(MessageResponse {
            message: "Repairman added successfully".to_string(),
        }))
    }

    /// List all repairmen ordered by id
    #[oai(path = "/list", method = "get", tag = "RepairmanTags::Repairman")]
    async fn list(&self, auth: BearerAuth) -> Result<Json<Vec<RepairmanOut>>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let repairmen = self.app_data.repairman_store.list().await?;
        Ok(Json(repairmen.into_iter().map(Into::into).collect()))
    }

    /// Fetch a single repairman
    #[oai(path = "/info/:repairman_id", method = "get", tag = "RepairmanTags::Repairman")]
    async fn info(&self, auth: BearerAuth, repairman_id: Path<i32>) -> Result<Json<RepairmanOut>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let repairman = self.app_data.repairman_store.get(repairman_id.0).await?;
        Ok(Json(repairman.into()))
    }

    /// Partially update a repairman
    ///
    /// "none" clears first name or surname; company_id 0 clears the company.
    #[oai(path = "/update/:repairman_id", method = "put", tag = "RepairmanTags::Repairman")]
    async fn update(
        &self,
        auth: BearerAuth,
        repairman_id: Path<i32>,
        first_name: Query<Option<String>>,
        surname: Query<Option<String>>,
        email: Query<Option<String>>,
        company_id: Query<Option<i32>>,
    ) -> Result<Json<RepairmanOut>, EntityError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        let updated = self
            .app_data
            .repairman_store
            .update(
                repairman_id.0,
                RepairmanChanges {
                    first_name: first_name.0,
                    surname: surname.0,
                    email: email.0,
                    company_id: company_id.0,
                },
                &admin.email,
            )
            .await?;

        Ok(Json(updated.into()))
    }

    /// Delete a repairman, returning the removed row
    #[oai(path = "/delete/:repairman_id", method = "delete", tag = "RepairmanTags::Repairman")]
    async fn delete(&self, auth: BearerAuth, repairman_id: Path<i32>) -> Result<Json<RepairmanOut>, EntityError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        let deleted = self.app_data.repairman_store.delete(repairman_id.0, &admin.email).await?;
        Ok(Json(deleted.into()))
    }
}
