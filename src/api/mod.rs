// API layer - HTTP endpoints
pub mod activities;
pub mod admin;
pub mod breakdown;
pub mod company;
pub mod health;
pub mod iot;
pub mod lantern;
pub mod mobile;
pub mod park;
pub mod renovation;
pub mod repairman;
pub mod statistics;
pub mod transfer;
pub mod updates;

pub use activities::ActivitiesApi;
pub use admin::AdminApi;
pub use breakdown::BreakdownApi;
pub use company::CompanyApi;
pub use health::HealthApi;
pub use iot::IotApi;
pub use lantern::LanternApi;
pub use mobile::MobileApi;
pub use park::ParkApi;
pub use renovation::RenovationApi;
pub use repairman::RepairmanApi;
pub use statistics::StatisticsApi;
pub use transfer::TransferApi;
pub use updates::UpdatesApi;

use poem_openapi::auth::Bearer;
use poem_openapi::SecurityScheme;

use crate::app_data::AppData;
use crate::errors::auth::AuthError;
use crate::types::db::admin as admin_db;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// Resolve a bearer token into an active admin account
pub(crate) async fn current_admin(app_data: &AppData, auth: &BearerAuth) -> Result<admin_db::Model, AuthError> {
    let claims = app_data.token_service.validate_jwt(&auth.0.token)?;

    let admin = app_data
        .admin_store
        .find_by_email(&claims.sub)
        .await?
        .ok_or_else(AuthError::invalid_token)?;

    if admin.status != "active" {
        return Err(AuthError::forbidden());
    }

    Ok(admin)
}

/// Like current_admin, additionally requiring the full_access rights tier
pub(crate) async fn full_access_admin(app_data: &AppData, auth: &BearerAuth) -> Result<admin_db::Model, AuthError> {
    let admin = current_admin(app_data, auth).await?;

    if admin.rights != "full_access" {
        return Err(AuthError::forbidden());
    }

    Ok(admin)
}
