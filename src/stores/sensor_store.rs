use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::errors::entity::EntityError;
use crate::types::db::sensor_response::{self, Entity as SensorResponse};

/// Repository for lantern motion sensor responses
pub struct SensorStore {
    db: DatabaseConnection,
}

impl SensorStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Record a motion activation ping for a lantern
    pub async fn record_motion(&self, lantern_id: i32) -> Result<sensor_response::Model, EntityError> {
        sensor_response::ActiveModel {
            id: ActiveValue::NotSet,
            lantern_id: Set(lantern_id),
            date: Set(Utc::now()),
            status: Set("activated".to_string()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| EntityError::database("record_motion", e))
    }

    /// Mark the latest sensor response for a lantern as deactivated
    pub async fn deactivate_latest(&self, lantern_id: i32) -> Result<(), EntityError> {
        let latest = self
            .latest_for(lantern_id)
            .await?
            .ok_or_else(|| EntityError::not_found("Sensor response for this lantern"))?;

        let mut active: sensor_response::ActiveModel = latest.into();
        active.status = Set("deactivated".to_string());
        active
            .update(&self.db)
            .await
            .map_err(|e| EntityError::database("deactivate_motion", e))?;

        Ok(())
    }

    /// Latest sensor response for a lantern, if any
    pub async fn latest_for(&self, lantern_id: i32) -> Result<Option<sensor_response::Model>, EntityError> {
        SensorResponse::find()
            .filter(sensor_response::Column::LanternId.eq(lantern_id))
            .order_by_desc(sensor_response::Column::Date)
            .order_by_desc(sensor_response::Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| EntityError::database("latest_sensor_response", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ActivityLogger;
    use crate::stores::lantern_store::NewLantern;
    use crate::stores::{ActivityStore, LanternStore};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;
    use std::sync::Arc;

    async fn setup_stores() -> (SensorStore, LanternStore) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let activity_logger = Arc::new(ActivityLogger::new(Arc::new(ActivityStore::new(db.clone()))));
        (SensorStore::new(db.clone()), LanternStore::new(db, activity_logger))
    }

    async fn seed_lantern(lanterns: &LanternStore) -> i32 {
        lanterns
            .create(
                NewLantern {
                    base_brightness: 50,
                    active_brightness: 100,
                    active_time: 30,
                    status: "working".to_string(),
                    park_id: None,
                },
                "admin@test.com",
            )
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_record_and_deactivate_latest() {
        let (sensors, lanterns) = setup_stores().await;
        let lantern_id = seed_lantern(&lanterns).await;

        sensors.record_motion(lantern_id).await.unwrap();
        sensors.record_motion(lantern_id).await.unwrap();

        sensors.deactivate_latest(lantern_id).await.unwrap();

        let latest = sensors.latest_for(lantern_id).await.unwrap().unwrap();
        assert_eq!(latest.status, "deactivated");
    }

    #[tokio::test]
    async fn test_deactivate_without_responses_is_not_found() {
        let (sensors, lanterns) = setup_stores().await;
        let lantern_id = seed_lantern(&lanterns).await;

        let result = sensors.deactivate_latest(lantern_id).await;

        assert!(matches!(result, Err(EntityError::NotFound(_))));
    }
}
