use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{current_admin, BearerAuth};
use crate::app_data::AppData;
use crate::errors::entity::EntityError;
use crate::types::dto::statistics::StatisticsResponse;

/// Park statistics endpoint backed by externally defined SQL functions
pub struct StatisticsApi {
    app_data: Arc<AppData>,
}

impl StatisticsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for statistics endpoints
#[derive(Tags)]
enum StatisticsTags {
    /// Aggregate statistics
    Statistics,
}

#[OpenApi]
impl StatisticsApi {
    /// Aggregate statistics for one park
    ///
    /// Validates park existence, then forwards three raw queries to the
    /// database functions. Their internal ranking/threshold logic lives in
    /// the database; failures surface untranslated.
    #[oai(path = "/statistics", method = "post", tag = "StatisticsTags::Statistics")]
    async fn get_statistics(
        &self,
        auth: BearerAuth,
        park_id: Query<i32>,
    ) -> Result<Json<StatisticsResponse>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        self.app_data.park_store.get(park_id.0).await?;

        let statistics = self.app_data.statistics_store.park_statistics(park_id.0).await?;
        Ok(Json(statistics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{login, setup_app_data};
    use poem_openapi::auth::Bearer;

    #[tokio::test]
    async fn test_statistics_for_missing_park_is_not_found() {
        let app_data = setup_app_data().await;
        let api = StatisticsApi::new(app_data.clone());
        let token = login(&app_data, "admin@test.com").await;

        let result = api.get_statistics(BearerAuth(Bearer { token }), Query(9)).await;

        assert!(matches!(result, Err(EntityError::NotFound(_))));
    }
}
