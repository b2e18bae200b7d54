use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{current_admin, BearerAuth};
use crate::app_data::AppData;
use crate::errors::entity::EntityError;
use crate::types::dto::activity::ActivityOut;

/// Read-only endpoints over the activity audit trail
pub struct ActivitiesApi {
    app_data: Arc<AppData>,
}

impl ActivitiesApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for activity endpoints
#[derive(Tags)]
enum ActivityTags {
    /// Database activity audit trail
    Activities,
}

#[OpenApi(prefix_path = "/activities")]
impl ActivitiesApi {
    /// List activities, newest first
    #[oai(path = "/", method = "get", tag = "ActivityTags::Activities")]
    async fn list(
        &self,
        auth: BearerAuth,
        skip: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Vec<ActivityOut>>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let skip = skip.0.unwrap_or(0);
        let limit = limit.0.unwrap_or(20).clamp(1, 100);

        let activities = self.app_data.activity_store.list(skip, limit).await?;
        Ok(Json(activities.into_iter().map(Into::into).collect()))
    }

    /// Latest activities for the dashboard
    #[oai(path = "/recent", method = "get", tag = "ActivityTags::Activities")]
    async fn recent(&self, auth: BearerAuth, limit: Query<Option<u64>>) -> Result<Json<Vec<ActivityOut>>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let limit = limit.0.unwrap_or(10).clamp(1, 50);

        let activities = self.app_data.activity_store.recent(limit).await?;
        Ok(Json(activities.into_iter().map(Into::into).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{login, setup_app_data};
    use poem_openapi::auth::Bearer;

    #[tokio::test]
    async fn test_mutations_show_up_in_recent() {
        let app_data = setup_app_data().await;
        let api = ActivitiesApi::new(app_data.clone());
        let token = login(&app_data, "admin@test.com").await;

        app_data
            .park_store
            .create("Central".to_string(), "Main St 1".to_string(), "admin@test.com")
            .await
            .unwrap();

        let recent = api
            .recent(BearerAuth(Bearer { token }), Query(None))
            .await
            .unwrap();

        assert!(recent
            .0
            .iter()
            .any(|a| a.activity_type == "park_created" && a.performed_by.as_deref() == Some("admin@test.com")));
    }
}
