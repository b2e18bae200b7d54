// Library exports for integration tests and external use

pub mod api;
pub mod app_data;
pub mod config;
pub mod errors;
pub mod services;
pub mod stores;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;
    use std::sync::Arc;

    use crate::app_data::AppData;
    use crate::stores::admin_store::NewAdmin;

    /// In-memory application state for unit tests
    pub async fn setup_app_data() -> Arc<AppData> {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        Arc::new(AppData::init(
            db,
            "test-secret-key-minimum-32-characters-long".to_string(),
            "test-pepper".to_string(),
        ))
    }

    /// Register an admin (idempotent) and return a bearer token for it
    pub async fn login(app_data: &Arc<AppData>, email: &str) -> String {
        let _ = app_data
            .admin_store
            .register(NewAdmin {
                first_name: "Test".to_string(),
                surname: "Admin".to_string(),
                email: email.to_string(),
                password: "testpass".to_string(),
                park_id: None,
            })
            .await;

        app_data
            .token_service
            .generate_jwt(email)
            .expect("Failed to generate test token")
    }

    /// Grant the full_access tier to an existing admin
    pub async fn promote_full_access(app_data: &Arc<AppData>, email: &str) {
        app_data
            .admin_store
            .update_status(email, "active".to_string(), "full_access".to_string(), "test")
            .await
            .expect("Failed to promote admin");
    }
}
