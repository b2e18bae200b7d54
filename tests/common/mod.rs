// Common test utilities for integration tests

use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use std::sync::Arc;

use smartlighting_backend::app_data::AppData;
use smartlighting_backend::stores::admin_store::NewAdmin;

/// Creates in-memory application state with migrations applied
pub async fn setup_app_data() -> Arc<AppData> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    Arc::new(AppData::init(
        db,
        "test-secret-key-minimum-32-characters-long".to_string(),
        "test-pepper".to_string(),
    ))
}

/// Registers an admin account for tests and returns its email
#[allow(dead_code)]
pub async fn register_admin(app_data: &Arc<AppData>, email: &str) -> String {
    app_data
        .admin_store
        .register(NewAdmin {
            first_name: "Test".to_string(),
            surname: "Admin".to_string(),
            email: email.to_string(),
            password: "testpass".to_string(),
            park_id: None,
        })
        .await
        .expect("Failed to register test admin");

    email.to_string()
}
