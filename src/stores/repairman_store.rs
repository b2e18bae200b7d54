use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use std::sync::Arc;

use crate::errors::entity::EntityError;
use crate::services::ActivityLogger;
use crate::types::db::company::Entity as Company;
use crate::types::db::repairman::{self, Entity as Repairman};
use crate::types::internal::activity::{ActivityType, NewActivity};

/// Fields for a new repairman
#[derive(Debug)]
pub struct NewRepairman {
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub company_id: Option<i32>,
}

/// Partial update for a repairman
///
/// `"none"` clears first name or surname; a `company_id` of 0 clears the
/// company assignment.
#[derive(Debug, Default)]
pub struct RepairmanChanges {
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub company_id: Option<i32>,
}

/// Repository for repairman rows
pub struct RepairmanStore {
    db: DatabaseConnection,
    activity_logger: Arc<ActivityLogger>,
}

impl RepairmanStore {
    pub fn new(db: DatabaseConnection, activity_logger: Arc<ActivityLogger>) -> Self {
        Self { db, activity_logger }
    }

    /// Create a repairman; the email must be unused and the company must exist
    pub async fn create(&self, new: NewRepairman, performed_by: &str) -> Result<repairman::Model, EntityError> {
        self.check_email_free(&new.email, None).await?;

        let company_name = match new.company_id {
            Some(company_id) => Some(self.company_name(company_id).await?),
            None => None,
        };

        let model = repairman::ActiveModel {
            id: ActiveValue::NotSet,
            first_name: Set(Some(new.first_name)),
            surname: Set(Some(new.surname)),
            email: Set(Some(new.email)),
            phone: Set(None),
            specialization: Set(None),
            company_id: Set(new.company_id),
        }
        .insert(&self.db)
        .await
        .map_err(|e| EntityError::database("create_repairman", e))?;

        let mut details = format!("Email: {}", model.email.as_deref().unwrap_or("-"));
        if let Some(name) = company_name {
            details.push_str(&format!(", company: {}", name));
        }

        self.activity_logger
            .log(
                NewActivity::new(
                    ActivityType::UserCreated,
                    "repairman",
                    format!("Created repairman '{}'", full_name(&model)),
                )
                .entity_id(model.id)
                .details(details)
                .performed_by(performed_by),
            )
            .await;

        Ok(model)
    }

    pub async fn list(&self) -> Result<Vec<repairman::Model>, EntityError> {
        Repairman::find()
            .order_by_asc(repairman::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EntityError::database("list_repairmen", e))
    }

    pub async fn get(&self, repairman_id: i32) -> Result<repairman::Model, EntityError> {
        Repairman::find_by_id(repairman_id)
            .one(&self.db)
            .await
            .map_err(|e| EntityError::database("get_repairman", e))?
            .ok_or_else(|| EntityError::not_found("Repairman"))
    }

    /// Apply a partial update; an empty change set is a no-op
    pub async fn update(
        &self,
        repairman_id: i32,
        changes: RepairmanChanges,
        performed_by: &str,
    ) -> Result<repairman::Model, EntityError> {
        let existing = self.get(repairman_id).await?;

        let mut described = Vec::new();
        let mut active: repairman::ActiveModel = existing.clone().into();

        if let Some(first_name) = changes.first_name {
            let first_name = clear_on_sentinel(first_name);
            described.push(format!(
                "first name: '{}' -> '{}'",
                existing.first_name.as_deref().unwrap_or("-"),
                first_name.as_deref().unwrap_or("-")
            ));
            active.first_name = Set(first_name);
        }

        if let Some(surname) = changes.surname {
            let surname = clear_on_sentinel(surname);
            described.push(format!(
                "surname: '{}' -> '{}'",
                existing.surname.as_deref().unwrap_or("-"),
                surname.as_deref().unwrap_or("-")
            ));
            active.surname = Set(surname);
        }

        if let Some(email) = changes.email {
            self.check_email_free(&email, Some(repairman_id)).await?;
            described.push(format!(
                "email: '{}' -> '{}'",
                existing.email.as_deref().unwrap_or("-"),
                email
            ));
            active.email = Set(Some(email));
        }

        if let Some(company_id) = changes.company_id {
            if company_id == 0 {
                described.push("company: cleared".to_string());
                active.company_id = Set(None);
            } else {
                let name = self.company_name(company_id).await?;
                described.push(format!("company: {}", name));
                active.company_id = Set(Some(company_id));
            }
        }

        if described.is_empty() {
            return Ok(existing);
        }

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| EntityError::database("update_repairman", e))?;

        self.activity_logger
            .log(
                NewActivity::new(
                    ActivityType::UserUpdated,
                    "repairman",
                    format!("Updated repairman '{}'", full_name(&updated)),
                )
                .entity_id(updated.id)
                .details(described.join("; "))
                .performed_by(performed_by),
            )
            .await;

        Ok(updated)
    }

    pub async fn delete(&self, repairman_id: i32, performed_by: &str) -> Result<repairman::Model, EntityError> {
        let existing = self.get(repairman_id).await?;

        let company_name = match existing.company_id {
            Some(company_id) => self.company_name(company_id).await.ok(),
            None => None,
        };

        Repairman::delete_by_id(repairman_id)
            .exec(&self.db)
            .await
            .map_err(|e| EntityError::database("delete_repairman", e))?;

        let mut details = format!("Email: {}", existing.email.as_deref().unwrap_or("-"));
        if let Some(name) = company_name {
            details.push_str(&format!(", company: {}", name));
        }

        self.activity_logger
            .log(
                NewActivity::new(
                    ActivityType::UserDeleted,
                    "repairman",
                    format!("Deleted repairman '{}'", full_name(&existing)),
                )
                .entity_id(existing.id)
                .details(details)
                .performed_by(performed_by),
            )
            .await;

        Ok(existing)
    }

    async fn check_email_free(&self, email: &str, exclude_id: Option<i32>) -> Result<(), EntityError> {
        let mut query = Repairman::find().filter(repairman::Column::Email.eq(email));
        if let Some(id) = exclude_id {
            query = query.filter(repairman::Column::Id.ne(id));
        }

        let existing = query
            .one(&self.db)
            .await
            .map_err(|e| EntityError::database("check_repairman_email", e))?;

        if existing.is_some() {
            return Err(EntityError::duplicate_email());
        }
        Ok(())
    }

    async fn company_name(&self, company_id: i32) -> Result<String, EntityError> {
        Company::find_by_id(company_id)
            .one(&self.db)
            .await
            .map_err(|e| EntityError::database("find_company", e))?
            .map(|c| c.name.unwrap_or_default())
            .ok_or_else(|| EntityError::reference_not_found("Company", company_id))
    }
}

fn full_name(model: &repairman::Model) -> String {
    format!(
        "{} {}",
        model.first_name.as_deref().unwrap_or(""),
        model.surname.as_deref().unwrap_or("")
    )
}

fn clear_on_sentinel(value: String) -> Option<String> {
    if value == "none" {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::company_store::NewCompany;
    use crate::stores::{ActivityStore, CompanyStore};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_stores() -> (RepairmanStore, CompanyStore) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let activity_logger = Arc::new(ActivityLogger::new(Arc::new(ActivityStore::new(db.clone()))));
        (
            RepairmanStore::new(db.clone(), activity_logger.clone()),
            CompanyStore::new(db, activity_logger),
        )
    }

    fn new_repairman(email: &str, company_id: Option<i32>) -> NewRepairman {
        NewRepairman {
            first_name: "Ivan".to_string(),
            surname: "Koval".to_string(),
            email: email.to_string(),
            company_id,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_on_second_create() {
        let (repairmen, _companies) = setup_stores().await;

        repairmen
            .create(new_repairman("ivan@example.com", None), "admin@test.com")
            .await
            .unwrap();
        let second = repairmen
            .create(new_repairman("ivan@example.com", None), "admin@test.com")
            .await;

        assert!(matches!(second, Err(EntityError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_with_missing_company_fails() {
        let (repairmen, _companies) = setup_stores().await;

        let result = repairmen
            .create(new_repairman("ivan@example.com", Some(7)), "admin@test.com")
            .await;

        assert!(matches!(result, Err(EntityError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_surname_sentinel_and_company_clear() {
        let (repairmen, companies) = setup_stores().await;
        let company = companies
            .create(
                NewCompany {
                    name: "Lightfix".to_string(),
                    email: "ops@lightfix.example".to_string(),
                    address: None,
                    notes: None,
                },
                "admin@test.com",
            )
            .await
            .unwrap();
        let created = repairmen
            .create(new_repairman("ivan@example.com", Some(company.id)), "admin@test.com")
            .await
            .unwrap();

        let updated = repairmen
            .update(
                created.id,
                RepairmanChanges {
                    surname: Some("none".to_string()),
                    company_id: Some(0),
                    ..Default::default()
                },
                "admin@test.com",
            )
            .await
            .unwrap();

        assert_eq!(updated.surname, None);
        assert_eq!(updated.company_id, None);
    }
}
