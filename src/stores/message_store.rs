use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::errors::entity::EntityError;
use crate::types::db::user_message::{self, Entity as UserMessage};

/// Fields for a new user-submitted issue report
#[derive(Debug)]
pub struct NewUserMessage {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub priority: String,
}

/// Repository for mobile user messages
pub struct MessageStore {
    db: DatabaseConnection,
}

impl MessageStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, new: NewUserMessage) -> Result<user_message::Model, EntityError> {
        user_message::ActiveModel {
            id: ActiveValue::NotSet,
            title: Set(new.title),
            description: Set(new.description),
            location: Set(new.location),
            photo_url: Set(None),
            priority: Set(new.priority),
            status: Set("new".to_string()),
            device_token: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| EntityError::database("create_user_message", e))
    }

    /// List user messages, newest first
    pub async fn list(&self) -> Result<Vec<user_message::Model>, EntityError> {
        UserMessage::find()
            .order_by_desc(user_message::Column::CreatedAt)
            .order_by_desc(user_message::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EntityError::database("list_user_messages", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    #[tokio::test]
    async fn test_create_and_list() {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");
        let store = MessageStore::new(db);

        let created = store
            .create(NewUserMessage {
                title: "Broken lantern".to_string(),
                description: "Dark for a week".to_string(),
                location: Some("Central park, alley 1".to_string()),
                priority: "high".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(created.status, "new");

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Broken lantern");
    }
}
