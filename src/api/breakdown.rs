use chrono::Utc;
use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{current_admin, BearerAuth};
use crate::app_data::AppData;
use crate::errors::entity::EntityError;
use crate::services::datetime;
use crate::stores::breakdown_store::{BreakdownChanges, NewBreakdown};
use crate::types::dto::breakdown::BreakdownOut;
use crate::types::dto::common::MessageResponse;

/// Breakdown CRUD endpoints
pub struct BreakdownApi {
    app_data: Arc<AppData>,
}

impl BreakdownApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for breakdown endpoints
#[derive(Tags)]
enum BreakdownTags {
    /// Breakdown management
    Breakdown,
}

#[OpenApi(prefix_path = "/breakdown")]
impl BreakdownApi {
    /// Report a new breakdown against a lantern
    ///
    /// `date` and `time` use the fixed %Y-%m-%d and %H:%M formats and default
    /// to the current instant when omitted.
    #[oai(path = "/add", method = "post", tag = "BreakdownTags::Breakdown")]
    async fn add(
        &self,
        auth: BearerAuth,
        lantern_id: Query<i32>,
        date: Query<Option<String>>,
        time: Query<Option<String>>,
        description: Query<Option<String>>,
        status: Query<Option<String>>,
        priority: Query<Option<String>>,
    ) -> Result<Json<MessageResponse>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let now = Utc::now();
        let parsed_date = match date.0 {
            Some(value) => datetime::parse_date(&value)?,
            None => now.date_naive(),
        };
        let parsed_time = match time.0 {
            Some(value) => datetime::parse_time(&value)?,
            None => now.time(),
        };

        self.app_data
            .breakdown_store
            .create(NewBreakdown {
                lantern_id: lantern_id.0,
                reported_at: datetime::combine(parsed_date, parsed_time),
                description: description.0,
                status: status.0.unwrap_or_else(|| "reported".to_string()),
                priority: priority.0.unwrap_or_else(|| "medium".to_string()),
            })
            .await?;

        Ok(Json(MessageResponse {
            message: "Breakdown added successfully".to_string(),
        }))
    }

    /// List all breakdowns ordered by id
    #[oai(path = "/list", method = "get", tag = "BreakdownTags::Breakdown")]
    async fn list(&self, auth: BearerAuth) -> Result<Json<Vec<BreakdownOut>>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let breakdowns = self.app_data.breakdown_store.list().await?;
        Ok(Json(breakdowns.into_iter().map(Into::into).collect()))
    }

    /// Fetch a single breakdown
    #[oai(path = "/info/:breakdown_id", method = "get", tag = "BreakdownTags::Breakdown")]
    async fn info(&self, auth: BearerAuth, breakdown_id: Path<i32>) -> Result<Json<BreakdownOut>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let breakdown = self.app_data.breakdown_store.get(breakdown_id.0).await?;
        Ok(Json(breakdown.into()))
    }

    /// Partially update a breakdown
    ///
    /// `date` and `time` replace only the corresponding part of the stored
    /// report timestamp; a description of "none" clears it.
    #[oai(path = "/update/:breakdown_id", method = "put", tag = "BreakdownTags::Breakdown")]
    async fn update(
        &self,
        auth: BearerAuth,
        breakdown_id: Path<i32>,
        lantern_id: Query<Option<i32>>,
        date: Query<Option<String>>,
        time: Query<Option<String>>,
        description: Query<Option<String>>,
        status: Query<Option<String>>,
        priority: Query<Option<String>>,
    ) -> Result<Json<BreakdownOut>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let parsed_date = match date.0 {
            Some(value) => Some(datetime::parse_date(&value)?),
            None => None,
        };
        let parsed_time = match time.0 {
            Some(value) => Some(datetime::parse_time(&value)?),
            None => None,
        };

        let updated = self
            .app_data
            .breakdown_store
            .update(
                breakdown_id.0,
                BreakdownChanges {
                    lantern_id: lantern_id.0,
                    date: parsed_date,
                    time: parsed_time,
                    description: description.0,
                    status: status.0,
                    priority: priority.0,
                },
            )
            .await?;

        Ok(Json(updated.into()))
    }

    /// Delete a breakdown, returning the removed row
    #[oai(path = "/delete/:breakdown_id", method = "delete", tag = "BreakdownTags::Breakdown")]
    async fn delete(&self, auth: BearerAuth, breakdown_id: Path<i32>) -> Result<Json<BreakdownOut>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let deleted = self.app_data.breakdown_store.delete(breakdown_id.0).await?;
        Ok(Json(deleted.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{login, setup_app_data};
    use poem_openapi::auth::Bearer;

    #[tokio::test]
    async fn test_add_with_missing_lantern_is_not_found() {
        let app_data = setup_app_data().await;
        let api = BreakdownApi::new(app_data.clone());
        let token = login(&app_data, "admin@test.com").await;

        let result = api
            .add(
                BearerAuth(Bearer { token: token.clone() }),
                Query(55),
                Query(None),
                Query(None),
                Query(Some("Dark".to_string())),
                Query(None),
                Query(None),
            )
            .await;
        assert!(matches!(result, Err(EntityError::NotFound(_))));

        let listed = api.list(BearerAuth(Bearer { token })).await.unwrap();
        assert!(listed.0.is_empty());
    }

    #[tokio::test]
    async fn test_add_with_malformed_date_is_validation_error() {
        let app_data = setup_app_data().await;
        let api = BreakdownApi::new(app_data.clone());
        let token = login(&app_data, "admin@test.com").await;

        let result = api
            .add(
                BearerAuth(Bearer { token }),
                Query(1),
                Query(Some("03/01/2025".to_string())),
                Query(None),
                Query(None),
                Query(None),
                Query(None),
            )
            .await;

        assert!(matches!(result, Err(EntityError::Validation(_))));
    }
}
