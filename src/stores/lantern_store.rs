use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, QueryOrder, Set};
use std::sync::Arc;

use crate::errors::entity::EntityError;
use crate::services::ActivityLogger;
use crate::types::db::lantern::{self, Entity as Lantern};
use crate::types::db::park::Entity as Park;
use crate::types::internal::activity::{ActivityType, NewActivity};

/// Fields for a new lantern
#[derive(Debug)]
pub struct NewLantern {
    pub base_brightness: i32,
    pub active_brightness: i32,
    pub active_time: i32,
    pub status: String,
    pub park_id: Option<i32>,
}

/// Partial update for a lantern; fields are applied only when present.
/// A `park_id` of 0 clears the park reference.
#[derive(Debug, Default)]
pub struct LanternChanges {
    pub base_brightness: Option<i32>,
    pub active_brightness: Option<i32>,
    pub active_time: Option<i32>,
    pub status: Option<String>,
    pub park_id: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Remote-control command applied from the mobile API
#[derive(Debug, Clone, Copy)]
pub enum ControlCommand {
    TurnOn,
    TurnOff,
    SetBrightness(i32),
}

/// Repository for lantern rows
pub struct LanternStore {
    db: DatabaseConnection,
    activity_logger: Arc<ActivityLogger>,
}

impl LanternStore {
    pub fn new(db: DatabaseConnection, activity_logger: Arc<ActivityLogger>) -> Self {
        Self { db, activity_logger }
    }

    /// Create a lantern, validating ranges and the optional park reference
    pub async fn create(&self, new: NewLantern, performed_by: &str) -> Result<lantern::Model, EntityError> {
        validate_brightness(new.base_brightness)?;
        validate_brightness(new.active_brightness)?;
        if new.active_time < 5 {
            return Err(EntityError::validation("Active time must be at least 5 seconds"));
        }

        let park_name = match new.park_id {
            Some(park_id) => Some(self.park_name(park_id).await?),
            None => None,
        };

        let now = Utc::now();
        let model = lantern::ActiveModel {
            id: ActiveValue::NotSet,
            name: Set(None),
            brand: Set(None),
            model: Set(None),
            power: Set(None),
            height: Set(None),
            base_brightness: Set(new.base_brightness),
            active_brightness: Set(new.active_brightness),
            active_time: Set(new.active_time),
            status: Set(new.status),
            latitude: Set(None),
            longitude: Set(None),
            park_id: Set(new.park_id),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        }
        .insert(&self.db)
        .await
        .map_err(|e| EntityError::database("create_lantern", e))?;

        self.activity_logger
            .log(
                NewActivity::new(
                    ActivityType::LanternCreated,
                    "lantern",
                    format!("Created lantern #{}", model.id),
                )
                .entity_id(model.id)
                .details(format!(
                    "Park: {}, base brightness: {}%, active brightness: {}%, status: {}",
                    park_name.as_deref().unwrap_or("unassigned"),
                    model.base_brightness,
                    model.active_brightness,
                    model.status
                ))
                .performed_by(performed_by),
            )
            .await;

        Ok(model)
    }

    pub async fn list(&self) -> Result<Vec<lantern::Model>, EntityError> {
        Lantern::find()
            .order_by_asc(lantern::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EntityError::database("list_lanterns", e))
    }

    pub async fn get(&self, lantern_id: i32) -> Result<lantern::Model, EntityError> {
        Lantern::find_by_id(lantern_id)
            .one(&self.db)
            .await
            .map_err(|e| EntityError::database("get_lantern", e))?
            .ok_or_else(|| EntityError::not_found("Lantern"))
    }

    /// Apply a partial update; an empty change set is a no-op
    pub async fn update(
        &self,
        lantern_id: i32,
        changes: LanternChanges,
        performed_by: &str,
    ) -> Result<lantern::Model, EntityError> {
        let existing = self.get(lantern_id).await?;

        let mut described = Vec::new();
        let mut active: lantern::ActiveModel = existing.clone().into();

        if let Some(base_brightness) = changes.base_brightness {
            validate_brightness(base_brightness)?;
            described.push(format!("base brightness: {}%", base_brightness));
            active.base_brightness = Set(base_brightness);
        }

        if let Some(active_brightness) = changes.active_brightness {
            validate_brightness(active_brightness)?;
            described.push(format!("active brightness: {}%", active_brightness));
            active.active_brightness = Set(active_brightness);
        }

        if let Some(active_time) = changes.active_time {
            if active_time < 5 {
                return Err(EntityError::validation("Active time must be at least 5 seconds"));
            }
            described.push(format!("active time: {}s", active_time));
            active.active_time = Set(active_time);
        }

        if let Some(status) = changes.status {
            described.push(format!("status: {}", status));
            active.status = Set(status);
        }

        if let Some(park_id) = changes.park_id {
            if park_id == 0 {
                described.push("park: cleared".to_string());
                active.park_id = Set(None);
            } else {
                let park_name = self.park_name(park_id).await?;
                described.push(format!("park: {}", park_name));
                active.park_id = Set(Some(park_id));
            }
        }

        if let Some(latitude) = changes.latitude {
            described.push(format!("latitude: {}", latitude));
            active.latitude = Set(Some(latitude));
        }

        if let Some(longitude) = changes.longitude {
            described.push(format!("longitude: {}", longitude));
            active.longitude = Set(Some(longitude));
        }

        if described.is_empty() {
            return Ok(existing);
        }

        active.updated_at = Set(Some(Utc::now()));
        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| EntityError::database("update_lantern", e))?;

        self.activity_logger
            .log(
                NewActivity::new(
                    ActivityType::LanternUpdated,
                    "lantern",
                    format!("Updated lantern #{}", updated.id),
                )
                .entity_id(updated.id)
                .details(format!("Changes: {}", described.join(", ")))
                .performed_by(performed_by),
            )
            .await;

        Ok(updated)
    }

    pub async fn delete(&self, lantern_id: i32, performed_by: &str) -> Result<lantern::Model, EntityError> {
        let existing = self.get(lantern_id).await?;

        let park_name = match existing.park_id {
            Some(park_id) => self.park_name(park_id).await.ok(),
            None => None,
        };

        Lantern::delete_by_id(lantern_id)
            .exec(&self.db)
            .await
            .map_err(|e| EntityError::database("delete_lantern", e))?;

        self.activity_logger
            .log(
                NewActivity::new(
                    ActivityType::LanternDeleted,
                    "lantern",
                    format!("Deleted lantern #{}", existing.id),
                )
                .entity_id(existing.id)
                .details(format!(
                    "Park: {}, status: {}",
                    park_name.as_deref().unwrap_or("unassigned"),
                    existing.status
                ))
                .performed_by(performed_by),
            )
            .await;

        Ok(existing)
    }

    /// Apply a mobile remote-control command
    pub async fn control(&self, lantern_id: i32, command: ControlCommand) -> Result<lantern::Model, EntityError> {
        let existing = self.get(lantern_id).await?;
        let mut active: lantern::ActiveModel = existing.clone().into();

        match command {
            ControlCommand::TurnOn => {
                active.status = Set("working".to_string());
                active.active_brightness = Set(existing.base_brightness);
            }
            ControlCommand::TurnOff => {
                active.status = Set("off".to_string());
                active.active_brightness = Set(0);
            }
            ControlCommand::SetBrightness(brightness) => {
                validate_brightness(brightness)?;
                active.active_brightness = Set(brightness);
                active.status = Set(if brightness > 0 { "working" } else { "off" }.to_string());
            }
        }

        active.updated_at = Set(Some(Utc::now()));
        active
            .update(&self.db)
            .await
            .map_err(|e| EntityError::database("control_lantern", e))
    }

    async fn park_name(&self, park_id: i32) -> Result<String, EntityError> {
        Park::find_by_id(park_id)
            .one(&self.db)
            .await
            .map_err(|e| EntityError::database("find_park", e))?
            .map(|p| p.name)
            .ok_or_else(|| EntityError::not_found("Park"))
    }
}

fn validate_brightness(value: i32) -> Result<(), EntityError> {
    if !(0..=100).contains(&value) {
        return Err(EntityError::validation("Brightness must be between 0 and 100"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::{ActivityStore, ParkStore};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, PaginatorTrait};

    async fn setup_stores() -> (LanternStore, ParkStore) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let activity_logger = Arc::new(ActivityLogger::new(Arc::new(ActivityStore::new(db.clone()))));
        (
            LanternStore::new(db.clone(), activity_logger.clone()),
            ParkStore::new(db, activity_logger),
        )
    }

    fn new_lantern(park_id: Option<i32>) -> NewLantern {
        NewLantern {
            base_brightness: 50,
            active_brightness: 100,
            active_time: 30,
            status: "working".to_string(),
            park_id,
        }
    }

    #[tokio::test]
    async fn test_create_with_park_and_list() {
        let (lanterns, parks) = setup_stores().await;
        let park = parks
            .create("Central".to_string(), "Main St 1".to_string(), "admin@test.com")
            .await
            .unwrap();

        let created = lanterns
            .create(new_lantern(Some(park.id)), "admin@test.com")
            .await
            .unwrap();
        assert_eq!(created.status, "working");
        assert_eq!(created.park_id, Some(park.id));

        let listed = lanterns.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].status, "working");
    }

    #[tokio::test]
    async fn test_create_with_missing_park_fails() {
        let (lanterns, _parks) = setup_stores().await;

        let result = lanterns.create(new_lantern(Some(42)), "admin@test.com").await;

        assert!(matches!(result, Err(EntityError::NotFound(_))));
        let count = Lantern::find().count(&lanterns.db).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_brightness() {
        let (lanterns, _parks) = setup_stores().await;

        let mut lantern = new_lantern(None);
        lantern.active_brightness = 150;
        let result = lanterns.create(lantern, "admin@test.com").await;

        assert!(matches!(result, Err(EntityError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_with_no_fields_is_noop() {
        let (lanterns, _parks) = setup_stores().await;
        let created = lanterns.create(new_lantern(None), "admin@test.com").await.unwrap();

        let unchanged = lanterns
            .update(created.id, LanternChanges::default(), "admin@test.com")
            .await
            .unwrap();

        assert_eq!(unchanged, created);
    }

    #[tokio::test]
    async fn test_update_park_zero_clears_reference() {
        let (lanterns, parks) = setup_stores().await;
        let park = parks
            .create("Central".to_string(), "Main St 1".to_string(), "admin@test.com")
            .await
            .unwrap();
        let created = lanterns
            .create(new_lantern(Some(park.id)), "admin@test.com")
            .await
            .unwrap();

        let updated = lanterns
            .update(
                created.id,
                LanternChanges {
                    park_id: Some(0),
                    ..Default::default()
                },
                "admin@test.com",
            )
            .await
            .unwrap();

        assert_eq!(updated.park_id, None);
    }

    #[tokio::test]
    async fn test_delete_missing_lantern_is_not_found() {
        let (lanterns, _parks) = setup_stores().await;
        lanterns.create(new_lantern(None), "admin@test.com").await.unwrap();

        let result = lanterns.delete(99, "admin@test.com").await;
        assert!(matches!(result, Err(EntityError::NotFound(_))));

        let count = Lantern::find().count(&lanterns.db).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_control_transitions() {
        let (lanterns, _parks) = setup_stores().await;
        let created = lanterns.create(new_lantern(None), "admin@test.com").await.unwrap();

        let off = lanterns.control(created.id, ControlCommand::TurnOff).await.unwrap();
        assert_eq!(off.status, "off");
        assert_eq!(off.active_brightness, 0);

        let on = lanterns.control(created.id, ControlCommand::TurnOn).await.unwrap();
        assert_eq!(on.status, "working");
        assert_eq!(on.active_brightness, on.base_brightness);

        let dimmed = lanterns
            .control(created.id, ControlCommand::SetBrightness(40))
            .await
            .unwrap();
        assert_eq!(dimmed.status, "working");
        assert_eq!(dimmed.active_brightness, 40);

        let dark = lanterns
            .control(created.id, ControlCommand::SetBrightness(0))
            .await
            .unwrap();
        assert_eq!(dark.status, "off");
    }
}
