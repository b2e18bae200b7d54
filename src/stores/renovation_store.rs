use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::errors::entity::EntityError;
use crate::services::datetime;
use crate::types::db::lantern::Entity as Lantern;
use crate::types::db::renovation::{self, Entity as Renovation};
use crate::types::db::repairman::Entity as Repairman;

/// Fields for a new renovation job
#[derive(Debug)]
pub struct NewRenovation {
    pub lantern_id: i32,
    pub start_date: DateTime<Utc>,
    pub status: String,
}

/// Partial update for a renovation
///
/// `date` and `time` replace the corresponding part of the stored start date.
/// A `repairman_id` of 0 clears the assignment.
#[derive(Debug, Default)]
pub struct RenovationChanges {
    pub lantern_id: Option<i32>,
    pub repairman_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub cost: Option<i32>,
}

/// Repository for renovation rows
pub struct RenovationStore {
    db: DatabaseConnection,
}

impl RenovationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a renovation; the lantern reference must exist
    pub async fn create(&self, new: NewRenovation) -> Result<renovation::Model, EntityError> {
        self.check_lantern(new.lantern_id).await?;

        renovation::ActiveModel {
            id: ActiveValue::NotSet,
            lantern_id: Set(Some(new.lantern_id)),
            repairman_id: Set(None),
            description: Set(None),
            status: Set(new.status),
            priority: Set("medium".to_string()),
            cost: Set(0),
            start_date: Set(Some(new.start_date)),
            end_date: Set(None),
        }
        .insert(&self.db)
        .await
        .map_err(|e| EntityError::database("create_renovation", e))
    }

    pub async fn list(&self) -> Result<Vec<renovation::Model>, EntityError> {
        Renovation::find()
            .order_by_asc(renovation::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EntityError::database("list_renovations", e))
    }

    pub async fn get(&self, renovation_id: i32) -> Result<renovation::Model, EntityError> {
        Renovation::find_by_id(renovation_id)
            .one(&self.db)
            .await
            .map_err(|e| EntityError::database("get_renovation", e))?
            .ok_or_else(|| EntityError::not_found("Renovation"))
    }

    /// Apply a partial update; an empty change set is a no-op
    pub async fn update(&self, renovation_id: i32, changes: RenovationChanges) -> Result<renovation::Model, EntityError> {
        let existing = self.get(renovation_id).await?;

        let mut touched = false;
        let mut active: renovation::ActiveModel = existing.clone().into();

        if let Some(lantern_id) = changes.lantern_id {
            self.check_lantern(lantern_id).await?;
            active.lantern_id = Set(Some(lantern_id));
            touched = true;
        }

        if let Some(repairman_id) = changes.repairman_id {
            if repairman_id == 0 {
                active.repairman_id = Set(None);
            } else {
                self.check_repairman(repairman_id).await?;
                active.repairman_id = Set(Some(repairman_id));
            }
            touched = true;
        }

        if changes.date.is_some() || changes.time.is_some() {
            let base = existing.start_date.unwrap_or_else(Utc::now);
            let date = changes.date.unwrap_or_else(|| base.date_naive());
            let time = changes.time.unwrap_or_else(|| base.time());
            active.start_date = Set(Some(datetime::combine(date, time)));
            touched = true;
        }

        if let Some(description) = changes.description {
            active.description = if description == "none" {
                Set(None)
            } else {
                Set(Some(description))
            };
            touched = true;
        }

        if let Some(status) = changes.status {
            active.status = Set(status);
            touched = true;
        }

        if let Some(cost) = changes.cost {
            active.cost = Set(cost);
            touched = true;
        }

        if !touched {
            return Ok(existing);
        }

        active
            .update(&self.db)
            .await
            .map_err(|e| EntityError::database("update_renovation", e))
    }

    pub async fn delete(&self, renovation_id: i32) -> Result<renovation::Model, EntityError> {
        let existing = self.get(renovation_id).await?;

        Renovation::delete_by_id(renovation_id)
            .exec(&self.db)
            .await
            .map_err(|e| EntityError::database("delete_renovation", e))?;

        Ok(existing)
    }

    async fn check_lantern(&self, lantern_id: i32) -> Result<(), EntityError> {
        Lantern::find_by_id(lantern_id)
            .one(&self.db)
            .await
            .map_err(|e| EntityError::database("find_lantern", e))?
            .ok_or_else(|| EntityError::reference_not_found("Lantern", lantern_id))?;
        Ok(())
    }

    async fn check_repairman(&self, repairman_id: i32) -> Result<(), EntityError> {
        Repairman::find_by_id(repairman_id)
            .one(&self.db)
            .await
            .map_err(|e| EntityError::database("find_repairman", e))?
            .ok_or_else(|| EntityError::reference_not_found("Repairman", repairman_id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ActivityLogger;
    use crate::stores::lantern_store::NewLantern;
    use crate::stores::{ActivityStore, LanternStore};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, PaginatorTrait};
    use std::sync::Arc;

    async fn setup_stores() -> (RenovationStore, LanternStore) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let activity_logger = Arc::new(ActivityLogger::new(Arc::new(ActivityStore::new(db.clone()))));
        (RenovationStore::new(db.clone()), LanternStore::new(db, activity_logger))
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

    fn start_date() -> DateTime<Utc> {
        datetime::combine(
            datetime::parse_date("2025-05-10").unwrap(),
            datetime::parse_time("09:00").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_requires_existing_lantern() {
        let (renovations, _lanterns) = setup_stores().await;

        let result = renovations
            .create(NewRenovation {
                lantern_id: 9,
                start_date: start_date(),
                status: "planned".to_string(),
            })
            .await;

        assert!(matches!(result, Err(EntityError::NotFound(_))));
        let count = Renovation::find().count(&renovations.db).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_update_repairman_zero_clears_assignment() {
        let (renovations, lanterns) = setup_stores().await;
        let lantern_id = seed_lantern(&lanterns).await;
        let created = renovations
            .create(NewRenovation {
                lantern_id,
                start_date: start_date(),
                status: "planned".to_string(),
            })
            .await
            .unwrap();

        // Assigning an unknown repairman fails
        let result = renovations
            .update(
                created.id,
                RenovationChanges {
                    repairman_id: Some(12),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(EntityError::NotFound(_))));

        // Clearing with 0 always succeeds
        let cleared = renovations
            .update(
                created.id,
                RenovationChanges {
                    repairman_id: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.repairman_id, None);
    }

    #[tokio::test]
    async fn test_update_date_and_cost() {
        let (renovations, lanterns) = setup_stores().await;
        let lantern_id = seed_lantern(&lanterns).await;
        let created = renovations
            .create(NewRenovation {
                lantern_id,
                start_date: start_date(),
                status: "planned".to_string(),
            })
            .await
            .unwrap();

        let updated = renovations
            .update(
                created.id,
                RenovationChanges {
                    date: Some(datetime::parse_date("2025-06-01").unwrap()),
                    cost: Some(2500),
                    status: Some("deferred".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(
            updated.start_date.unwrap().to_rfc3339(),
            "2025-06-01T09:00:00+00:00"
        );
        assert_eq!(updated.cost, 2500);
        assert_eq!(updated.status, "deferred");
    }
}
