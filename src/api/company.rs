use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{current_admin, BearerAuth};
use crate::app_data::AppData;
use crate::errors::entity::EntityError;
use crate::stores::company_store::{CompanyChanges, NewCompany};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::company::CompanyOut;

/// Company CRUD endpoints
pub struct CompanyApi {
    app_data: Arc<AppData>,
}

impl CompanyApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for company endpoints
#[derive(Tags)]
enum CompanyTags {
    /// Repair company management
    Company,
}

#[OpenApi(prefix_path = "/company")]
impl CompanyApi {
    /// Create a new repair company; the email must be unused
    #[oai(path = "/add", method = "post", tag = "CompanyTags::Company")]
    async fn add(
        &self,
        auth: BearerAuth,
        name: Query<String>,
        email: Query<String>,
        address: Query<Option<String>>,
        notes: Query<Option<String>>,
    ) -> Result<Json<MessageResponse>, EntityError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        self.app_data
            .company_store
            .create(
                NewCompany {
                    name: name.0,
                    email: email.0,
                    address: address.0,
                    notes: notes.0,
                },
                &admin.email,
            )
            .await?;

        Ok(Json(MessageResponse {
            message: "Company added successfully".to_string(),
        }))
    }

    /// List all companies ordered by id
    #[oai(path = "/list", method = "get", tag = "CompanyTags::Company")]
    async fn list(&self, auth: BearerAuth) -> Result<Json<Vec<CompanyOut>>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let companies = self.app_data.company_store.list().await?;
        Ok(Json(companies.into_iter().map(Into::into).collect()))
    }

    /// Fetch a single company
    #[oai(path = "/info/:company_id", method = "get", tag = "CompanyTags::Company")]
    async fn info(&self, auth: BearerAuth, company_id: Path<i32>) -> Result<Json<CompanyOut>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let company = self.app_data.company_store.get(company_id.0).await?;
        Ok(Json(company.into()))
    }

    /// Partially update a company; "none" clears nullable string fields
    #[oai(path = "/update/:company_id", method = "put", tag = "CompanyTags::Company")]
    async fn update(
        &self,
        auth: BearerAuth,
        company_id: Path<i32>,
        name: Query<Option<String>>,
        email: Query<Option<String>>,
        address: Query<Option<String>>,
        notes: Query<Option<String>>,
    ) -> Result<Json<CompanyOut>, EntityError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        let updated = self
            .app_data
            .company_store
            .update(
                company_id.0,
                CompanyChanges {
                    name: name.0,
                    email: email.0,
                    address: address.0,
                    notes: notes.0,
                },
                &admin.email,
            )
            .await?;

        Ok(Json(updated.into()))
    }

    /// Delete a company, returning the removed row
    #[oai(path = "/delete/:company_id", method = "delete", tag = "CompanyTags::Company")]
    async fn delete(&self, auth: BearerAuth, company_id: Path<i32>) -> Result<Json<CompanyOut>, EntityError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        let deleted = self.app_data.company_store.delete(company_id.0, &admin.email).await?;
        Ok(Json(deleted.into()))
    }
}
