use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::services::{ActivityLogger, ExportService, QrPairingService, TokenService};
use crate::stores::{
    ActivityStore, AdminStore, BreakdownStore, CompanyStore, LanternStore, MessageStore, ParkStore,
    RenovationStore, RepairmanStore, SensorStore, StatisticsStore, UpdateStore,
};

/// Centralized application data following the main-owned stores pattern
///
/// All stores and services are created once here and shared across the API
/// structs behind an `Arc<AppData>`.
pub struct AppData {
    pub db: DatabaseConnection,
    pub token_service: Arc<TokenService>,
    pub activity_logger: Arc<ActivityLogger>,
    pub qr_pairing: Arc<QrPairingService>,
    pub activity_store: Arc<ActivityStore>,
    pub admin_store: Arc<AdminStore>,
    pub lantern_store: Arc<LanternStore>,
    pub park_store: Arc<ParkStore>,
    pub breakdown_store: Arc<BreakdownStore>,
    pub renovation_store: Arc<RenovationStore>,
    pub repairman_store: Arc<RepairmanStore>,
    pub company_store: Arc<CompanyStore>,
    pub sensor_store: Arc<SensorStore>,
    pub update_store: Arc<UpdateStore>,
    pub message_store: Arc<MessageStore>,
    pub statistics_store: Arc<StatisticsStore>,
    pub export_service: Arc<ExportService>,
}

impl AppData {
    /// Build all stores and services
    ///
    /// The database must already be connected and migrated. The activity
    /// store comes first since the logger and most stores depend on it.
    pub fn init(db: DatabaseConnection, jwt_secret: String, password_pepper: String) -> Self {
        tracing::debug!("Creating stores...");

        let token_service = Arc::new(TokenService::new(jwt_secret));
        let qr_pairing = Arc::new(QrPairingService::new());

        let activity_store = Arc::new(ActivityStore::new(db.clone()));
        let activity_logger = Arc::new(ActivityLogger::new(activity_store.clone()));

        let admin_store = Arc::new(AdminStore::new(db.clone(), password_pepper, activity_logger.clone()));
        let lantern_store = Arc::new(LanternStore::new(db.clone(), activity_logger.clone()));
        let park_store = Arc::new(ParkStore::new(db.clone(), activity_logger.clone()));
        let breakdown_store = Arc::new(BreakdownStore::new(db.clone()));
        let renovation_store = Arc::new(RenovationStore::new(db.clone()));
        let repairman_store = Arc::new(RepairmanStore::new(db.clone(), activity_logger.clone()));
        let company_store = Arc::new(CompanyStore::new(db.clone(), activity_logger.clone()));
        let sensor_store = Arc::new(SensorStore::new(db.clone()));
        let update_store = Arc::new(UpdateStore::new(db.clone()));
        let message_store = Arc::new(MessageStore::new(db.clone()));
        let statistics_store = Arc::new(StatisticsStore::new(db.clone()));
        let export_service = Arc::new(ExportService::new(db.clone(), activity_logger.clone()));

        tracing::debug!("Stores created");

        Self {
            db,
            token_service,
            activity_logger,
            qr_pairing,
            activity_store,
            admin_store,
            lantern_store,
            park_store,
            breakdown_store,
            renovation_store,
            repairman_store,
            company_store,
            sensor_store,
            update_store,
            message_store,
            statistics_store,
            export_service,
        }
    }
}
