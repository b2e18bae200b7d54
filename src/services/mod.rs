// Services layer - Business logic
pub mod activity_logger;
pub mod datetime;
pub mod export_service;
pub mod qr_service;
pub mod token_service;

pub use activity_logger::ActivityLogger;
pub use export_service::ExportService;
pub use qr_service::QrPairingService;
pub use token_service::TokenService;
