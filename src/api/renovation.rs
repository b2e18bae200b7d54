use chrono::Utc;
use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{current_admin, BearerAuth};
use crate::app_data::AppData;
use crate::errors::entity::EntityError;
use crate::services::datetime;
use crate::stores::renovation_store::{NewRenovation, RenovationChanges};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::renovation::RenovationOut;

/// Renovation CRUD endpoints
pub struct RenovationApi {
    app_data: Arc<AppData>,
}

impl RenovationApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self { app_data }
    }
}

/// API tags for renovation endpoints
#[derive(Tags)]
enum RenovationTags {
    /// Renovation management
    Renovation,
}

#[OpenApi(prefix_path = "/renovation")]
impl RenovationApi {
    /// Schedule a new renovation for a lantern
    #[oai(path = "/add", method = "post", tag = "RenovationTags::Renovation")]
    async fn add(
        &self,
        auth: BearerAuth,
        lantern_id: Query<i32>,
        date: Query<Option<String>>,
        time: Query<Option<String>>,
        status: Query<Option<String>>,
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
            .renovation_store
            .create(NewRenovation {
                lantern_id: lantern_id.0,
                start_date: datetime::combine(parsed_date, parsed_time),
                status: status.0.unwrap_or_else(|| "planned".to_string()),
            })
            .await?;

        Ok(Json(MessageResponse {
            message: "Renovation added successfully".to_string(),
        }))
    }

    /// List all renovations ordered by id
    #[oai(path = "/list", method = "get", tag = "RenovationTags::Renovation")]
    async fn list(&self, auth: BearerAuth) -> Result<Json<Vec<RenovationOut>>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let renovations = self.app_data.renovation_store.list().await?;
        Ok(Json(renovations.into_iter().map(Into::into).collect()))
    }

    /// Fetch a single renovation
    #[oai(path = "/info/:renovation_id", method = "get", tag = "RenovationTags::Renovation")]
    async fn info(&self, auth: BearerAuth, renovation_id: Path<i32>) -> Result<Json<RenovationOut>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let renovation = self.app_data.renovation_store.get(renovation_id.0).await?;
        Ok(Json(renovation.into()))
    }

    /// Partially update a renovation
    ///
    /// `repairman_id` 0 clears the assignment; `date`/`time` adjust the start
    /// date; a description of "none" clears it.
    #[oai(path = "/update/:renovation_id", method = "put", tag = "RenovationTags::Renovation")]
    async fn update(
        &self,
        auth: BearerAuth,
        renovation_id: Path<i32>,
        lantern_id: Query<Option<i32>>,
        repairman_id: Query<Option<i32>>,
        date: Query<Option<String>>,
        time: Query<Option<String>>,
        description: Query<Option<String>>,
        status: Query<Option<String>>,
        cost: Query<Option<i32>>,
    ) -> Result<Json<RenovationOut>, EntityError> {
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
            .renovation_store
            .update(
                renovation_id.0,
                RenovationChanges {
                    lantern_id: lantern_id.0,
                    repairman_id: repairman_id.0,
                    date: parsed_date,
                    time: parsed_time,
                    description: description.0,
                    status: status.0,
                    cost: cost.0,
                },
            )
            .await?;

        Ok(Json(updated.into()))
    }

    /// Delete a renovation, returning the removed row
    #[oai(path = "/delete/:renovation_id", method = "delete", tag = "RenovationTags::Renovation")]
    async fn delete(&self, auth: BearerAuth, renovation_id: Path<i32>) -> Result<Json<RenovationOut>, EntityError> {
        current_admin(&self.app_data, &auth).await?;

        let deleted = self.app_data.renovation_store.delete(renovation_id.0).await?;
        Ok(Json(deleted.into()))
    }
}
