use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::auth::AuthError;
use crate::services::ActivityLogger;
use crate::types::db::admin::{self, Entity as Admin};
use crate::types::db::park::{self, Entity as Park};
use crate::types::internal::activity::{ActivityType, NewActivity};

/// Fields for registering a new admin
#[derive(Debug)]
pub struct NewAdmin {
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub park_id: Option<i32>,
}

/// Partial self-update for an admin; a `park_id` of 0 clears the assignment
#[derive(Debug, Default)]
pub struct AdminChanges {
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub park_id: Option<i32>,
}

/// AdminStore manages admin credentials and profiles
pub struct AdminStore {
    db: DatabaseConnection,
    password_pepper: String,
    activity_logger: Arc<ActivityLogger>,
}

impl AdminStore {
    /// Create a new AdminStore
    ///
    /// # Arguments
    /// * `db` - The database connection
    /// * `password_pepper` - The secret key mixed into password hashing
    pub fn new(db: DatabaseConnection, password_pepper: String, activity_logger: Arc<ActivityLogger>) -> Self {
        Self {
            db,
            password_pepper,
            activity_logger,
        }
    }

    /// Register a new admin account
    ///
    /// # Returns
    /// * `Ok(admin::Model)` - The created admin
    /// * `Err(AuthError)` - DuplicateEmail when the email is taken, NotFound
    ///   when the park reference is missing
    pub async fn register(&self, new: NewAdmin) -> Result<admin::Model, AuthError> {
        let existing = Admin::find()
            .filter(admin::Column::Email.eq(&new.email))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        if existing.is_some() {
            return Err(AuthError::duplicate_email());
        }

        if let Some(park_id) = new.park_id {
            let park = Park::find_by_id(park_id)
                .one(&self.db)
                .await
                .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;
            if park.is_none() {
                return Err(AuthError::not_found("Park"));
            }
        }

        let password_hash = self.hash_password(&new.password)?;

        let model = admin::ActiveModel {
            id: ActiveValue::NotSet,
            first_name: Set(new.first_name),
            surname: Set(new.surname),
            email: Set(new.email),
            password_hash: Set(password_hash),
            status: Set("active".to_string()),
            rights: Set("standard".to_string()),
            park_id: Set(new.park_id),
            created_at: Set(Some(Utc::now())),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            // The unique constraint is the backstop for the pre-check race
            if e.to_string().contains("UNIQUE") {
                AuthError::duplicate_email()
            } else {
                AuthError::internal_error(format!("Database error: {}", e))
            }
        })?;

        self.activity_logger
            .log(
                NewActivity::new(
                    ActivityType::UserCreated,
                    "admin",
                    format!("Created administrator '{} {}'", model.first_name, model.surname),
                )
                .entity_id(model.id)
                .details(format!("Email: {}", model.email))
                .performed_by(model.email.clone()),
            )
            .await;

        Ok(model)
    }

    /// Verify admin credentials and return the account on success
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<admin::Model, AuthError> {
        let admin = Admin::find()
            .filter(admin::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|_| AuthError::invalid_credentials())?
            .ok_or_else(AuthError::invalid_credentials)?;

        let parsed_hash = PasswordHash::new(&admin.password_hash)
            .map_err(|_| AuthError::invalid_credentials())?;

        self.argon2()
            .map_err(|_| AuthError::invalid_credentials())?
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::invalid_credentials())?;

        Ok(admin)
    }

    /// Look up an admin by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<admin::Model>, AuthError> {
        Admin::find()
            .filter(admin::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))
    }

    /// List all admins together with their park names
    pub async fn list_with_park_names(&self) -> Result<Vec<(admin::Model, Option<String>)>, AuthError> {
        let admins = Admin::find()
            .order_by_asc(admin::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        let parks: HashMap<i32, String> = Park::find()
            .all(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?
            .into_iter()
            .map(|p: park::Model| (p.id, p.name))
            .collect();

        Ok(admins
            .into_iter()
            .map(|a| {
                let park_name = a.park_id.and_then(|id| parks.get(&id).cloned());
                (a, park_name)
            })
            .collect())
    }

    /// Resolve a park name for profile responses
    pub async fn park_name(&self, park_id: Option<i32>) -> Result<Option<String>, AuthError> {
        match park_id {
            Some(id) => Ok(Park::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?
                .map(|p| p.name)),
            None => Ok(None),
        }
    }

    /// Apply a partial self-update; an empty change set is a no-op
    pub async fn update_self(&self, admin_id: i32, changes: AdminChanges) -> Result<admin::Model, AuthError> {
        let existing = Admin::find_by_id(admin_id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?
            .ok_or_else(|| AuthError::not_found("Admin"))?;

        let mut described = Vec::new();
        let mut active: admin::ActiveModel = existing.clone().into();

        if let Some(first_name) = changes.first_name {
            described.push(format!("first name: '{}' -> '{}'", existing.first_name, first_name));
            active.first_name = Set(first_name);
        }

        if let Some(surname) = changes.surname {
            described.push(format!("surname: '{}' -> '{}'", existing.surname, surname));
            active.surname = Set(surname);
        }

        if let Some(park_id) = changes.park_id {
            if park_id == 0 {
                described.push("park: cleared".to_string());
                active.park_id = Set(None);
            } else {
                let park = Park::find_by_id(park_id)
                    .one(&self.db)
                    .await
                    .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?
                    .ok_or_else(|| AuthError::not_found("Park"))?;
                described.push(format!("park: {}", park.name));
                active.park_id = Set(Some(park_id));
            }
        }

        if described.is_empty() {
            return Ok(existing);
        }

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        self.activity_logger
            .log(
                NewActivity::new(
                    ActivityType::UserUpdated,
                    "admin",
                    format!("Updated administrator '{} {}'", updated.first_name, updated.surname),
                )
                .entity_id(updated.id)
                .details(described.join("; "))
                .performed_by(updated.email.clone()),
            )
            .await;

        Ok(updated)
    }

    /// Set status and rights tier for the admin with the given email
    pub async fn update_status(
        &self,
        email: &str,
        status: String,
        rights: String,
        performed_by: &str,
    ) -> Result<admin::Model, AuthError> {
        let existing = self
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::not_found("Admin"))?;

        let mut active: admin::ActiveModel = existing.clone().into();
        active.status = Set(status.clone());
        active.rights = Set(rights.clone());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        self.activity_logger
            .log(
                NewActivity::new(
                    ActivityType::UserUpdated,
                    "admin",
                    format!("Updated status of administrator '{}'", updated.email),
                )
                .entity_id(updated.id)
                .details(format!("status: {}, rights: {}", status, rights))
                .performed_by(performed_by),
            )
            .await;

        Ok(updated)
    }

    /// Delete an admin account, returning the removed row
    pub async fn delete(&self, admin_id: i32, performed_by: &str) -> Result<admin::Model, AuthError> {
        let existing = Admin::find_by_id(admin_id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?
            .ok_or_else(|| AuthError::not_found("Admin"))?;

        Admin::delete_by_id(admin_id)
            .exec(&self.db)
            .await
            .map_err(|e| AuthError::internal_error(format!("Database error: {}", e)))?;

        self.activity_logger
            .log(
                NewActivity::new(
                    ActivityType::UserDeleted,
                    "admin",
                    format!("Deleted administrator '{} {}'", existing.first_name, existing.surname),
                )
                .entity_id(existing.id)
                .details(format!("Email: {}", existing.email))
                .performed_by(performed_by),
            )
            .await;

        Ok(existing)
    }

    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        let argon2 = self.argon2()?;

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::internal_error(format!("Password hashing error: {}", e)))?
            .to_string();

        Ok(hash)
    }

    fn argon2(&self) -> Result<Argon2<'_>, AuthError> {
        Argon2::new_with_secret(
            self.password_pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| AuthError::internal_error(format!("Failed to initialize Argon2 with secret: {}", e)))
    }
}

impl std::fmt::Debug for AdminStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminStore")
            .field("db", &"<connection>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::ActivityStore;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_store() -> AdminStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let activity_logger = Arc::new(ActivityLogger::new(Arc::new(ActivityStore::new(db.clone()))));
        AdminStore::new(db, "test-pepper".to_string(), activity_logger)
    }

    fn new_admin(email: &str) -> NewAdmin {
        NewAdmin {
            first_name: "Test".to_string(),
            surname: "Admin".to_string(),
            email: email.to_string(),
            password: "testpass".to_string(),
            park_id: None,
        }
    }

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let store = setup_store().await;

        let created = store.register(new_admin("admin@test.com")).await.unwrap();
        assert_eq!(created.status, "active");
        assert_eq!(created.rights, "standard");
        assert_ne!(created.password_hash, "testpass");

        let authenticated = store.authenticate("admin@test.com", "testpass").await.unwrap();
        assert_eq!(authenticated.id, created.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_rejected() {
        let store = setup_store().await;

        store.register(new_admin("admin@test.com")).await.unwrap();
        let second = store.register(new_admin("admin@test.com")).await;

        assert!(matches!(second, Err(AuthError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_wrong_password() {
        let store = setup_store().await;
        store.register(new_admin("admin@test.com")).await.unwrap();

        let result = store.authenticate("admin@test.com", "wrongpass").await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
    }

    #[tokio::test]
    async fn test_register_with_missing_park_fails() {
        let store = setup_store().await;

        let result = store
            .register(NewAdmin {
                park_id: Some(3),
                ..new_admin("admin@test.com")
            })
            .await;

        assert!(matches!(result, Err(AuthError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_status_promotes_rights() {
        let store = setup_store().await;
        store.register(new_admin("admin@test.com")).await.unwrap();

        let updated = store
            .update_status("admin@test.com", "active".to_string(), "full_access".to_string(), "root@test.com")
            .await
            .unwrap();

        assert_eq!(updated.rights, "full_access");
    }

    #[tokio::test]
    async fn test_delete_missing_admin_is_not_found() {
        let store = setup_store().await;

        let result = store.delete(41, "root@test.com").await;

        assert!(matches!(result, Err(AuthError::NotFound(_))));
    }
}
