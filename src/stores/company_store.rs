use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use std::sync::Arc;

use crate::errors::entity::EntityError;
use crate::services::ActivityLogger;
use crate::types::db::company::{self, Entity as Company};
use crate::types::internal::activity::{ActivityType, NewActivity};

/// Fields for a new company
#[derive(Debug)]
pub struct NewCompany {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for a company; `"none"` clears nullable string fields
#[derive(Debug, Default)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Repository for company rows
///
/// Email uniqueness is enforced by a pre-check query, not a constraint, so
/// concurrent duplicate submissions can race past the check.
pub struct CompanyStore {
    db: DatabaseConnection,
    activity_logger: Arc<ActivityLogger>,
}

impl CompanyStore {
    pub fn new(db: DatabaseConnection, activity_logger: Arc<ActivityLogger>) -> Self {
        Self { db, activity_logger }
    }

    pub async fn create(&self, new: NewCompany, performed_by: &str) -> Result<company::Model, EntityError> {
        self.check_email_free(&new.email, None).await?;

        let model = company::ActiveModel {
            id: ActiveValue::NotSet,
            name: Set(Some(new.name)),
            address: Set(new.address),
            phone: Set(None),
            email: Set(Some(new.email)),
            notes: Set(new.notes),
        }
        .insert(&self.db)
        .await
        .map_err(|e| EntityError::database("create_company", e))?;

        self.activity_logger
            .log(
                NewActivity::new(
                    ActivityType::UserCreated,
                    "company",
                    format!("Created company '{}'", model.name.as_deref().unwrap_or("")),
                )
                .entity_id(model.id)
                .details(format!(
                    "Email: {}, address: {}",
                    model.email.as_deref().unwrap_or("-"),
                    model.address.as_deref().unwrap_or("-")
                ))
                .performed_by(performed_by),
            )
            .await;

        Ok(model)
    }

    pub async fn list(&self) -> Result<Vec<company::Model>, EntityError> {
        Company::find()
            .order_by_asc(company::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EntityError::database("list_companies", e))
    }

    pub async fn get(&self, company_id: i32) -> Result<company::Model, EntityError> {
        Company::find_by_id(company_id)
            .one(&self.db)
            .await
            .map_err(|e| EntityError::database("get_company", e))?
            .ok_or_else(|| EntityError::not_found("Company"))
    }

    /// Apply a partial update; an empty change set is a no-op
    pub async fn update(&self, company_id: i32, changes: CompanyChanges, performed_by: &str) -> Result<company::Model, EntityError> {
        let existing = self.get(company_id).await?;

        let mut described = Vec::new();
        let mut active: company::ActiveModel = existing.clone().into();

        if let Some(name) = changes.name {
            let name = clear_on_sentinel(name);
            described.push(format!(
                "name: '{}' -> '{}'",
                existing.name.as_deref().unwrap_or("-"),
                name.as_deref().unwrap_or("-")
            ));
            active.name = Set(name);
        }

        if let Some(email) = changes.email {
            self.check_email_free(&email, Some(company_id)).await?;
            described.push(format!(
                "email: '{}' -> '{}'",
                existing.email.as_deref().unwrap_or("-"),
                email
            ));
            active.email = Set(Some(email));
        }

        if let Some(address) = changes.address {
            let address = clear_on_sentinel(address);
            described.push(format!(
                "address: '{}' -> '{}'",
                existing.address.as_deref().unwrap_or("-"),
                address.as_deref().unwrap_or("-")
            ));
            active.address = Set(address);
        }

        if let Some(notes) = changes.notes {
            let notes = clear_on_sentinel(notes);
            described.push(format!(
                "notes: '{}' -> '{}'",
                existing.notes.as_deref().unwrap_or("-"),
                notes.as_deref().unwrap_or("-")
            ));
            active.notes = Set(notes);
        }

        if described.is_empty() {
            return Ok(existing);
        }

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| EntityError::database("update_company", e))?;

        self.activity_logger
            .log(
                NewActivity::new(
                    ActivityType::UserUpdated,
                    "company",
                    format!("Updated company '{}'", updated.name.as_deref().unwrap_or("")),
                )
                .entity_id(updated.id)
                .details(described.join("; "))
                .performed_by(performed_by),
            )
            .await;

        Ok(updated)
    }

    pub async fn delete(&self, company_id: i32, performed_by: &str) -> Result<company::Model, EntityError> {
        let existing = self.get(company_id).await?;

        Company::delete_by_id(company_id)
            .exec(&self.db)
            .await
            .map_err(|e| EntityError::database("delete_company", e))?;

        self.activity_logger
            .log(
                NewActivity::new(
                    ActivityType::UserDeleted,
                    "company",
                    format!("Deleted company '{}'", existing.name.as_deref().unwrap_or("")),
                )
                .entity_id(existing.id)
                .details(format!("Email: {}", existing.email.as_deref().unwrap_or("-")))
                .performed_by(performed_by),
            )
            .await;

        Ok(existing)
    }

    async fn check_email_free(&self, email: &str, exclude_id: Option<i32>) -> Result<(), EntityError> {
        let mut query = Company::find().filter(company::Column::Email.eq(email));
        if let Some(id) = exclude_id {
            query = query.filter(company::Column::Id.ne(id));
        }

        let existing = query
            .one(&self.db)
            .await
            .map_err(|e| EntityError::database("check_company_email", e))?;

        if existing.is_some() {
            return Err(EntityError::duplicate_email());
        }
        Ok(())
    }
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
    use crate::stores::ActivityStore;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_store() -> CompanyStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let activity_logger = Arc::new(ActivityLogger::new(Arc::new(ActivityStore::new(db.clone()))));
        CompanyStore::new(db, activity_logger)
    }

    fn new_company(email: &str) -> NewCompany {
        NewCompany {
            name: "Lightfix".to_string(),
            email: email.to_string(),
            address: Some("Depot St 4".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_on_second_create() {
        let store = setup_store().await;

        store.create(new_company("ops@lightfix.example"), "admin@test.com").await.unwrap();
        let second = store.create(new_company("ops@lightfix.example"), "admin@test.com").await;

        assert!(matches!(second, Err(EntityError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_none_sentinel_clears_notes() {
        let store = setup_store().await;
        let created = store
            .create(
                NewCompany {
                    notes: Some("old notes".to_string()),
                    ..new_company("ops@lightfix.example")
                },
                "admin@test.com",
            )
            .await
            .unwrap();

        let updated = store
            .update(
                created.id,
                CompanyChanges {
                    notes: Some("none".to_string()),
                    ..Default::default()
                },
                "admin@test.com",
            )
            .await
            .unwrap();

        assert_eq!(updated.notes, None);
    }

    #[tokio::test]
    async fn test_update_keeps_own_email() {
        let store = setup_store().await;
        let created = store.create(new_company("ops@lightfix.example"), "admin@test.com").await.unwrap();

        // Re-submitting the current email is not a duplicate
        let updated = store
            .update(
                created.id,
                CompanyChanges {
                    email: Some("ops@lightfix.example".to_string()),
                    ..Default::default()
                },
                "admin@test.com",
            )
            .await
            .unwrap();

        assert_eq!(updated.email.as_deref(), Some("ops@lightfix.example"));
    }
}
