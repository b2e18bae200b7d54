use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use crate::errors::entity::EntityError;
use crate::services::datetime;
use crate::types::db::breakdown::{self, Entity as Breakdown};
use crate::types::db::lantern::Entity as Lantern;

/// Fields for a new breakdown report
#[derive(Debug)]
pub struct NewBreakdown {
    pub lantern_id: i32,
    pub reported_at: DateTime<Utc>,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
}

/// Partial update for a breakdown
///
/// `date` and `time` replace only the corresponding part of the stored
/// `reported_at`. A description of `"none"` clears the field.
#[derive(Debug, Default)]
pub struct BreakdownChanges {
    pub lantern_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Repository for breakdown rows
pub struct BreakdownStore {
    db: DatabaseConnection,
}

impl BreakdownStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a breakdown; the lantern reference must exist
    pub async fn create(&self, new: NewBreakdown) -> Result<breakdown::Model, EntityError> {
        self.check_lantern(new.lantern_id).await?;

        breakdown::ActiveModel {
            id: ActiveValue::NotSet,
            lantern_id: Set(new.lantern_id),
            description: Set(new.description),
            status: Set(new.status),
            priority: Set(new.priority),
            reported_at: Set(new.reported_at),
            fixed_at: Set(None),
        }
        .insert(&self.db)
        .await
        .map_err(|e| EntityError::database("create_breakdown", e))
    }

    pub async fn list(&self) -> Result<Vec<breakdown::Model>, EntityError> {
        Breakdown::find()
            .order_by_asc(breakdown::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EntityError::database("list_breakdowns", e))
    }

    pub async fn get(&self, breakdown_id: i32) -> Result<breakdown::Model, EntityError> {
        Breakdown::find_by_id(breakdown_id)
            .one(&self.db)
            .await
            .map_err(|e| EntityError::database("get_breakdown", e))?
            .ok_or_else(|| EntityError::not_found("Breakdown"))
    }

    /// Apply a partial update; an empty change set is a no-op
    pub async fn update(&self, breakdown_id: i32, changes: BreakdownChanges) -> Result<breakdown::Model, EntityError> {
        let existing = self.get(breakdown_id).await?;

        let mut touched = false;
        let mut active: breakdown::ActiveModel = existing.clone().into();

        if let Some(lantern_id) = changes.lantern_id {
            self.check_lantern(lantern_id).await?;
            active.lantern_id = Set(lantern_id);
            touched = true;
        }

        if changes.date.is_some() || changes.time.is_some() {
            let mut reported_at = existing.reported_at;
            if let Some(date) = changes.date {
                reported_at = datetime::combine(date, reported_at.time());
            }
            if let Some(time) = changes.time {
                reported_at = datetime::combine(reported_at.date_naive(), time);
            }
            active.reported_at = Set(reported_at);
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

        if let Some(priority) = changes.priority {
            active.priority = Set(priority);
            touched = true;
        }

        if !touched {
            return Ok(existing);
        }

        active
            .update(&self.db)
            .await
            .map_err(|e| EntityError::database("update_breakdown", e))
    }

    /// Breakdowns reported at or after the given instant, newest first
    pub async fn reported_since(&self, since: DateTime<Utc>) -> Result<Vec<breakdown::Model>, EntityError> {
        Breakdown::find()
            .filter(breakdown::Column::ReportedAt.gte(since))
            .order_by_desc(breakdown::Column::ReportedAt)
            .all(&self.db)
            .await
            .map_err(|e| EntityError::database("breakdowns_reported_since", e))
    }

    /// Breakdown history, optionally filtered by lantern, newest first
    pub async fn history(&self, lantern_id: Option<i32>, limit: u64) -> Result<Vec<breakdown::Model>, EntityError> {
        let mut query = Breakdown::find();
        if let Some(lantern_id) = lantern_id {
            query = query.filter(breakdown::Column::LanternId.eq(lantern_id));
        }

        query
            .order_by_desc(breakdown::Column::ReportedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| EntityError::database("breakdown_history", e))
    }

    pub async fn delete(&self, breakdown_id: i32) -> Result<breakdown::Model, EntityError> {
        let existing = self.get(breakdown_id).await?;

        Breakdown::delete_by_id(breakdown_id)
            .exec(&self.db)
            .await
            .map_err(|e| EntityError::database("delete_breakdown", e))?;

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
}
