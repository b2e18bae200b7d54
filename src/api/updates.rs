use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{current_admin, full_access_admin, BearerAuth};
use crate::app_data::AppData;
use crate::errors::entity::EntityError;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::update::{UpdateCreate, UpdateOut, UpdatePatch};

/// System update note endpoints; mutations need the full_access tier
pub struct UpdatesApi {
    app_data: Arc<AppData>,
}

impl UpdatesApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for update endpoints
#[derive(Tags)]
enum UpdateTags {
    /// System updates
    Updates,
}

#[OpenApi(prefix_path = "/updates")]
impl UpdatesApi {
    /// List system update notes, newest first
    #[oai(path = "/", method = "get", tag = "UpdateTags::Updates")]
    async fn list(
        &self,
        auth: BearerAuth,
        skip: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Vec<UpdateOut>>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let skip = skip.0.unwrap_or(0);
        let limit = limit.0.unwrap_or(10).clamp(1, 100);

        let updates = self.app_data.update_store.list(skip, limit).await?;
        Ok(Json(updates.into_iter().map(Into::into).collect()))
    }

    /// Fetch a single update note
    #[oai(path = "/:update_id", method = "get", tag = "UpdateTags::Updates")]
    async fn get(&self, auth: BearerAuth, update_id: Path<i32>) -> Result<Json<UpdateOut>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let update = self.app_data.update_store.get(update_id.0).await?;
        Ok(Json(update.into()))
    }

    /// Create a system update note (full access only)
    #[oai(path = "/", method = "post", tag = "UpdateTags::Updates")]
    async fn create(&self, auth: BearerAuth, body: Json<UpdateCreate>) -> Result<Json<UpdateOut>, EntityError> {
        full_access_admin(&self.app_data, &auth).await?;

        let created = self.app_data.update_store.create(body.0).await?;
        Ok(Json(created.into()))
    }

    /// Edit a system update note (full access only)
    #[oai(path = "/:update_id", method = "put", tag = "UpdateTags::Updates")]
    async fn patch(
        &self,
        auth: BearerAuth,
        update_id: Path<i32>,
        body: Json<UpdatePatch>,
    ) -> Result<Json<UpdateOut>, EntityError> {
        full_access_admin(&self.app_data, &auth).await?;

        let updated = self.app_data.update_store.patch(update_id.0, body.0).await?;
        Ok(Json(updated.into()))
    }

    /// Delete a system update note (full access only)
    #[oai(path = "/:update_id", method = "delete", tag = "UpdateTags::Updates")]
    async fn delete(&self, auth: BearerAuth, update_id: Path<i32>) -> Result<Json<MessageResponse>, EntityError> {
        full_access_admin(&self.app_data, &auth).await?;

        self.app_data.update_store.delete(update_id.0).await?;
        Ok(Json(MessageResponse {
            message: "Update deleted successfully".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{login, promote_full_access, setup_app_data};
    use poem_openapi::auth::Bearer;

    #[tokio::test]
    async fn test_create_requires_full_access() {
        let app_data = setup_app_data().await;
        let api = UpdatesApi::new(app_data.clone());
        let token = login(&app_data, "standard@test.com").await;

        let result = api
            .create(
                BearerAuth(Bearer { token }),
                Json(UpdateCreate {
                    title: "Firmware 1.2".to_string(),
                    content: "Rollout".to_string(),
                    version: None,
                }),
            )
            .await;

        assert!(matches!(result, Err(EntityError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_full_access_admin_can_create_and_list() {
        let app_data = setup_app_data().await;
        let api = UpdatesApi::new(app_data.clone());
        let token = login(&app_data, "root@test.com").await;
        promote_full_access(&app_data, "root@test.com").await;

        api.create(
            BearerAuth(Bearer { token: token.clone() }),
            Json(UpdateCreate {
                title: "Firmware 1.2".to_string(),
                content: "Rollout".to_string(),
                version: Some("1.2.0".to_string()),
            }),
        )
        .await
        .unwrap();

        let listed = api
            .list(BearerAuth(Bearer { token }), Query(None), Query(None))
            .await
            .unwrap();
        assert_eq!(listed.0.len(), 1);
        assert_eq!(listed.0[0].title, "Firmware 1.2");
    }
}
