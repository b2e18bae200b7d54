use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{current_admin, BearerAuth};
use crate::app_data::AppData;
use crate::errors::entity::EntityError;
use crate::stores::park_store::ParkChanges;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::park::{ParkOut, ParkRef};

/// Park CRUD endpoints
pub struct ParkApi {
    app_data: Arc<AppData>,
}

impl ParkApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for park endpoints
#[derive(Tags)]
enum ParkTags {
    /// Park management
    Park,
}

#[OpenApi(prefix_path = "/park")]
impl ParkApi {
    /// Create a new park
    #[oai(path = "/add", method = "post", tag = "ParkTags::Park")]
    async fn add(
        &self,
        auth: BearerAuth,
        name: Query<String>,
        address: Query<String>,
    ) -> Result<Json<MessageResponse>, EntityError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        self.app_data.park_store.create(name.0, address.0, &admin.email).await?;

        Ok(Json(MessageResponse {
            message: "Park added successfully".to_string(),
        }))
    }

    /// List all parks ordered by id
    #[oai(path = "/list", method = "get", tag = "ParkTags::Park")]
    async fn list(&self, auth: BearerAuth) -> Result<Json<Vec<ParkOut>>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let parks = self.app_data.park_store.list().await?;
        Ok(Json(parks.into_iter().map(Into::into).collect()))
    }

    /// Fetch a single park
    #[oai(path = "/info/:park_id", method = "get", tag = "ParkTags::Park")]
    async fn info(&self, auth: BearerAuth, park_id: Path<i32>) -> Result<Json<ParkOut>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let park = self.app_data.park_store.get(park_id.0).await?;
        Ok(Json(park.into()))
    }

    /// Partially update a park
    #[oai(path = "/update/:park_id", method = "put", tag = "ParkTags::Park")]
    async fn update(
        &self,
        auth: BearerAuth,
        park_id: Path<i32>,
        name: Query<Option<String>>,
        address: Query<Option<String>>,
    ) -> Result<Json<ParkOut>, EntityError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        let updated = self
            .app_data
            .park_store
            .update(
                park_id.0,
                ParkChanges {
                    name: name.0,
                    address: address.0,
                },
                &admin.email,
            )
            .await?;

        Ok(Json(updated.into()))
    }

    /// Delete a park, returning the removed row
    #[oai(path = "/delete/:park_id", method = "delete", tag = "ParkTags::Park")]
    async fn delete(&self, auth: BearerAuth, park_id: Path<i32>) -> Result<Json<ParkOut>, EntityError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        let deleted = self.app_data.park_store.delete(park_id.0, &admin.email).await?;
        Ok(Json(deleted.into()))
    }

    /// Minimal park list for the registration dropdown; no authentication
    #[oai(path = "/registration-list", method = "get", tag = "ParkTags::Park")]
    async fn registration_list(&self) -> Result<Json<Vec<ParkRef>>, EntityError> {
        let parks = self.app_data.park_store.list().await?;
        Ok(Json(parks.into_iter().map(Into::into).collect()))
    }
}
