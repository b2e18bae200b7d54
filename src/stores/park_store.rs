use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, QueryOrder, Set};
use std::sync::Arc;

use crate::errors::entity::EntityError;
use crate::services::ActivityLogger;
use crate::types::db::park::{self, Entity as Park};
use crate::types::internal::activity::{ActivityType, NewActivity};

/// Partial update for a park; fields are applied only when present
#[derive(Debug, Default)]
pub struct ParkChanges {
    pub name: Option<String>,
    pub address: Option<String>,
}

/// Repository for park rows
pub struct ParkStore {
    db: DatabaseConnection,
    activity_logger: Arc<ActivityLogger>,
}

impl ParkStore {
    pub fn new(db: DatabaseConnection, activity_logger: Arc<ActivityLogger>) -> Self {
        Self { db, activity_logger }
    }

    pub async fn create(&self, name: String, address: String, performed_by: &str) -> Result<park::Model, EntityError> {
        let now = Utc::now();
        let model = park::ActiveModel {
            id: ActiveValue::NotSet,
            name: Set(name),
            address: Set(address),
            latitude: Set(None),
            longitude: Set(None),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        }
        .insert(&self.db)
        .await
        .map_err(|e| EntityError::database("create_park", e))?;

        self.activity_logger
            .log(
                NewActivity::new(
                    ActivityType::ParkCreated,
                    "park",
                    format!("Created park '{}'", model.name),
                )
                .entity_id(model.id)
                .details(format!("Address: {}", model.address))
                .performed_by(performed_by),
            )
            .await;

        Ok(model)
    }

    pub async fn list(&self) -> Result<Vec<park::Model>, EntityError> {
        Park::find()
            .order_by_asc(park::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EntityError::database("list_parks", e))
    }

    pub async fn get(&self, park_id: i32) -> Result<park::Model, EntityError> {
        Park::find_by_id(park_id)
            .one(&self.db)
            .await
            .map_err(|e| EntityError::database("get_park", e))?
            .ok_or_else(|| EntityError::not_found("Park"))
    }

    /// Apply a partial update; an empty change set is a no-op
    pub async fn update(&self, park_id: i32, changes: ParkChanges, performed_by: &str) -> Result<park::Model, EntityError> {
        let existing = self.get(park_id).await?;

        let mut described = Vec::new();
        let mut active: park::ActiveModel = existing.clone().into();

        if let Some(name) = changes.name {
            described.push(format!("name: '{}' -> '{}'", existing.name, name));
            active.name = Set(name);
        }

        if let Some(address) = changes.address {
            described.push(format!("address: '{}' -> '{}'", existing.address, address));
            active.address = Set(address);
        }

        if described.is_empty() {
            return Ok(existing);
        }

        active.updated_at = Set(Some(Utc::now()));
        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| EntityError::database("update_park", e))?;

        self.activity_logger
            .log(
                NewActivity::new(
                    ActivityType::ParkUpdated,
                    "park",
                    format!("Updated park '{}'", updated.name),
                )
                .entity_id(updated.id)
                .details(described.join("; "))
                .performed_by(performed_by),
            )
            .await;

        Ok(updated)
    }

    pub async fn delete(&self, park_id: i32, performed_by: &str) -> Result<park::Model, EntityError> {
        let existing = self.get(park_id).await?;

        Park::delete_by_id(park_id)
            .exec(&self.db)
            .await
            .map_err(|e| EntityError::database("delete_park", e))?;

        self.activity_logger
            .log(
                NewActivity::new(
                    ActivityType::ParkDeleted,
                    "park",
                    format!("Deleted park '{}'", existing.name),
                )
                .entity_id(existing.id)
                .details(format!("Address: {}", existing.address))
                .performed_by(performed_by),
            )
            .await;

        Ok(existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::ActivityStore;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, PaginatorTrait};

    async fn setup_store() -> ParkStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let activity_logger = Arc::new(ActivityLogger::new(Arc::new(ActivityStore::new(db.clone()))));
        ParkStore::new(db, activity_logger)
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let store = setup_store().await;

        let park = store
            .create("Central".to_string(), "Main St 1".to_string(), "admin@test.com")
            .await
            .unwrap();
        assert_eq!(park.name, "Central");

        let parks = store.list().await.unwrap();
        assert_eq!(parks.len(), 1);
        assert_eq!(parks[0].address, "Main St 1");
    }

    #[tokio::test]
    async fn test_update_without_fields_is_noop() {
        let store = setup_store().await;
        let park = store
            .create("Central".to_string(), "Main St 1".to_string(), "admin@test.com")
            .await
            .unwrap();

        let unchanged = store
            .update(park.id, ParkChanges::default(), "admin@test.com")
            .await
            .unwrap();

        assert_eq!(unchanged, park);
    }

    #[tokio::test]
    async fn test_delete_missing_park_leaves_rows_untouched() {
        let store = setup_store().await;
        store
            .create("Central".to_string(), "Main St 1".to_string(), "admin@test.com")
            .await
            .unwrap();

        let result = store.delete(999, "admin@test.com").await;
        assert!(matches!(result, Err(EntityError::NotFound(_))));

        let count = Park::find().count(&store.db).await.unwrap();
        assert_eq!(count, 1);
    }
}
