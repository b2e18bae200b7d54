use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};

use crate::errors::entity::EntityError;
use crate::types::db::database_activity::{self, Entity as DatabaseActivity};
use crate::types::internal::activity::NewActivity;

/// Repository for the append-only activity audit table
pub struct ActivityStore {
    db: DatabaseConnection,
}

impl ActivityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append one activity row
    ///
    /// # Errors
    ///
    /// Returns `EntityError` when the insert fails
    pub async fn record(&self, activity: NewActivity) -> Result<(), EntityError> {
        let row = database_activity::ActiveModel {
            id: ActiveValue::NotSet,
            activity_type: Set(activity.activity_type.as_str().to_string()),
            entity_type: Set(activity.entity_type),
            entity_id: Set(activity.entity_id),
            description: Set(activity.description),
            details: Set(activity.details),
            performed_by: Set(activity.performed_by),
            created_at: Set(Utc::now()),
        };

        row.insert(&self.db)
            .await
            .map_err(|e| EntityError::database("record_activity", e))?;

        Ok(())
    }

    /// List activities, newest first
    pub async fn list(&self, skip: u64, limit: u64) -> Result<Vec<database_activity::Model>, EntityError> {
        DatabaseActivity::find()
            .order_by_desc(database_activity::Column::CreatedAt)
            .order_by_desc(database_activity::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| EntityError::database("list_activities", e))
    }

    /// Latest activities for the dashboard
    pub async fn recent(&self, limit: u64) -> Result<Vec<database_activity::Model>, EntityError> {
        self.list(0, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::internal::activity::ActivityType;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_store() -> ActivityStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");
        ActivityStore::new(db)
    }

    #[tokio::test]
    async fn test_record_and_list_newest_first() {
        let store = setup_store().await;

        for i in 0..3 {
            store
                .record(
                    NewActivity::new(ActivityType::LanternCreated, "lantern", format!("Created lantern #{}", i))
                        .entity_id(i),
                )
                .await
                .unwrap();
        }

        let rows = store.list(0, 20).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].entity_id, Some(2));
        assert_eq!(rows[2].entity_id, Some(0));
    }

    #[tokio::test]
    async fn test_list_respects_skip_and_limit() {
        let store = setup_store().await;

        for i in 0..5 {
            store
                .record(NewActivity::new(ActivityType::ParkUpdated, "park", format!("Updated park #{}", i)))
                .await
                .unwrap();
        }

        let page = store.list(1, 2).await.unwrap();
        assert_eq!(page.len(), 2);

        let recent = store.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
    }
}
