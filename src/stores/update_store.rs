use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};

use crate::errors::entity::EntityError;
use crate::types::db::update::{self, Entity as Update};
use crate::types::dto::update::{UpdateCreate, UpdatePatch};

/// Repository for system update notes
pub struct UpdateStore {
    db: DatabaseConnection,
}

impl UpdateStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, new: UpdateCreate) -> Result<update::Model, EntityError> {
        update::ActiveModel {
            id: ActiveValue::NotSet,
            title: Set(new.title),
            content: Set(new.content),
            version: Set(new.version),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        }
        .insert(&self.db)
        .await
        .map_err(|e| EntityError::database("create_update", e))
    }

    /// List update notes, newest first
    pub async fn list(&self, skip: u64, limit: u64) -> Result<Vec<update::Model>, EntityError> {
        Update::find()
            .order_by_desc(update::Column::CreatedAt)
            .order_by_desc(update::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| EntityError::database("list_updates", e))
    }

    pub async fn get(&self, update_id: i32) -> Result<update::Model, EntityError> {
        Update::find_by_id(update_id)
            .one(&self.db)
            .await
            .map_err(|e| EntityError::database("get_update", e))?
            .ok_or_else(|| EntityError::not_found("Update"))
    }

    /// Apply a partial edit; an empty change set is a no-op
    pub async fn patch(&self, update_id: i32, patch: UpdatePatch) -> Result<update::Model, EntityError> {
        let existing = self.get(update_id).await?;

        let mut touched = false;
        let mut active: update::ActiveModel = existing.clone().into();

        if let Some(title) = patch.title {
            active.title = Set(title);
            touched = true;
        }
        if let Some(content) = patch.content {
            active.content = Set(content);
            touched = true;
        }
        if let Some(version) = patch.version {
            active.version = Set(Some(version));
            touched = true;
        }

        if !touched {
            return Ok(existing);
        }

        active.updated_at = Set(Some(Utc::now()));
        active
            .update(&self.db)
            .await
            .map_err(|e| EntityError::database("update_update", e))
    }

    pub async fn delete(&self, update_id: i32) -> Result<update::Model, EntityError> {
        let existing = self.get(update_id).await?;

        Update::delete_by_id(update_id)
            .exec(&self.db)
            .await
            .map_err(|e| EntityError::database("delete_update", e))?;

        Ok(existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_store() -> UpdateStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");
        UpdateStore::new(db)
    }

    fn new_update(title: &str) -> UpdateCreate {
        UpdateCreate {
            title: title.to_string(),
            content: "Scheduled firmware rollout".to_string(),
            version: Some("1.2.0".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_list_newest_first() {
        let store = setup_store().await;

        store.create(new_update("first")).await.unwrap();
        store.create(new_update("second")).await.unwrap();

        let listed = store.list(0, 10).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "second");
    }

    #[tokio::test]
    async fn test_patch_sets_updated_at() {
        let store = setup_store().await;
        let created = store.create(new_update("first")).await.unwrap();
        assert_eq!(created.updated_at, None);

        let patched = store
            .patch(
                created.id,
                UpdatePatch {
                    title: Some("revised".to_string()),
                    content: None,
                    version: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(patched.title, "revised");
        assert!(patched.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_missing_update_is_not_found() {
        let store = setup_store().await;

        let result = store.delete(8).await;

        assert!(matches!(result, Err(EntityError::NotFound(_))));
    }
}
