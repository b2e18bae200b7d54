use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{current_admin, BearerAuth};
use crate::app_data::AppData;
use crate::errors::entity::EntityError;
use crate::stores::lantern_store::{LanternChanges, NewLantern};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::lantern::LanternOut;

/// Lantern CRUD endpoints
pub struct LanternApi {
    app_data: Arc<AppData>,
}

impl LanternApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for lantern endpoints
#[derive(Tags)]
enum LanternTags {
    /// Lantern management
    Lantern,
}

#[OpenApi(prefix_path = "/lantern")]
impl LanternApi {
    /// Create a new lantern
    ///
    /// Brightness values are percentages (0-100); active_time must be at
    /// least 5 seconds. The park reference, when given, must exist.
    #[oai(path = "/add", method = "post", tag = "LanternTags::Lantern")]
    async fn add(
        &self,
        auth: BearerAuth,
        base_brightness: Query<Option<i32>>,
        active_brightness: Query<Option<i32>>,
        active_time: Query<Option<i32>>,
        status: Query<Option<String>>,
        park_id: Query<Option<i32>>,
    ) -> Result<Json<MessageResponse>, EntityError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        self.app_data
            .lantern_store
            .create(
                NewLantern {
                    base_brightness: base_brightness.0.unwrap_or(0),
                    active_brightness: active_brightness.0.unwrap_or(0),
                    active_time: active_time.0.unwrap_or(5),
                    status: status.0.unwrap_or_else(|| "working".to_string()),
                    park_id: park_id.0,
                },
                &admin.email,
            )
            .await?;

        Ok(Json(MessageResponse {
            message: "Lantern created successfully".to_string(),
        }))
    }

    /// List all lanterns ordered by id
    #[oai(path = "/list", method = "get", tag = "LanternTags::Lantern")]
    async fn list(&self, auth: BearerAuth) -> Result<Json<Vec<LanternOut>>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let lanterns = self.app_data.lantern_store.list().await?;
        Ok(Json(lanterns.into_iter().map(Into::into).collect()))
    }

    /// Fetch a single lantern
    #[oai(path = "/info/:lantern_id", method = "get", tag = "LanternTags::Lantern")]
    async fn info(&self, auth: BearerAuth, lantern_id: Path<i32>) -> Result<Json<LanternOut>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let lantern = self.app_data.lantern_store.get(lantern_id.0).await?;
        Ok(Json(lantern.into()))
    }

    /// Partially update a lantern
    ///
    /// Only supplied fields are applied; park_id 0 clears the park reference.
    #[oai(path = "/update/:lantern_id", method = "put", tag = "LanternTags::Lantern")]
    async fn update(
        &self,
        auth: BearerAuth,
        lantern_id: Path<i32>,
        base_brightness: Query<Option<i32>>,
        active_brightness: Query<Option<i32>>,
        active_time: Query<Option<i32>>,
        status: Query<Option<String>>,
        park_id: Query<Option<i32>>,
        latitude: Query<Option<f64>>,
        longitude: Query<Option<f64>>,
    ) -> Result<Json<LanternOut>, EntityError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        let updated = self
            .app_data
            .lantern_store
            .update(
                lantern_id.0,
                LanternChanges {
                    base_brightness: base_brightness.0,
                    active_brightness: active_brightness.0,
                    active_time: active_time.0,
                    status: status.0,
                    park_id: park_id.0,
                    latitude: latitude.0,
                    longitude: longitude.0,
                },
                &admin.email,
            )
            .await?;

        Ok(Json(updated.into()))
    }

    /// Delete a lantern, returning the removed row
    #[oai(path = "/delete/:lantern_id", method = "delete", tag = "LanternTags::Lantern")]
    async fn delete(&self, auth: BearerAuth, lantern_id: Path<i32>) -> Result<Json<LanternOut>, EntityError> {
        let admin = current_admin(&self.app_data, &auth).await?;

        let deleted = self.app_data.lantern_store.delete(lantern_id.0, &admin.email).await?;
        Ok(Json(deleted.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{login, setup_app_data};
    use poem_openapi::auth::Bearer;

    #[tokio::test]
    async fn test_created_lantern_appears_in_list_with_working_status() {
        let app_data = setup_app_data().await;
        let api = LanternApi::new(app_data.clone());
        let token = login(&app_data, "admin@test.com").await;

        let park = app_data
            .park_store
            .create("Central".to_string(), "Main St 1".to_string(), "admin@test.com")
            .await
            .unwrap();

        api.add(
            BearerAuth(Bearer { token: token.clone() }),
            Query(Some(50)),
            Query(Some(100)),
            Query(Some(30)),
            Query(None),
            Query(Some(park.id)),
        )
        .await
        .unwrap();

        let listed = api.list(BearerAuth(Bearer { token })).await.unwrap();
        assert_eq!(listed.0.len(), 1);
        assert_eq!(listed.0[0].status, "working");
        assert_eq!(listed.0[0].park_id, Some(park.id));
    }

    #[tokio::test]
    async fn test_delete_missing_lantern_is_not_found() {
        let app_data = setup_app_data().await;
        let api = LanternApi::new(app_data.clone());
        let token = login(&app_data, "admin@test.com").await;

        let result = api.delete(BearerAuth(Bearer { token }), Path(17)).await;

        assert!(matches!(result, Err(EntityError::NotFound(_))));
    }
}
