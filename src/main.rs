use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, middleware::Cors, EndpointExt, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::Database;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use smartlighting_backend::api::{
    ActivitiesApi, AdminApi, BreakdownApi, CompanyApi, HealthApi, IotApi, LanternApi, MobileApi,
    ParkApi, RenovationApi, RepairmanApi, StatisticsApi, TransferApi, UpdatesApi,
};
use smartlighting_backend::app_data::AppData;
use smartlighting_backend::config::Settings;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env().expect("Invalid configuration");

    let db = Database::connect(&settings.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Connected to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database migrations completed");

    let app_data = Arc::new(AppData::init(
        db,
        settings.jwt_secret.clone(),
        settings.password_pepper.clone(),
    ));

    let api_service = OpenApiService::new(
        (
            HealthApi,
            AdminApi::new(app_data.clone()),
            TransferApi::new(app_data.clone()),
            LanternApi::new(app_data.clone()),
            ParkApi::new(app_data.clone()),
            BreakdownApi::new(app_data.clone()),
            RenovationApi::new(app_data.clone()),
            RepairmanApi::new(app_data.clone()),
            CompanyApi::new(app_data.clone()),
            StatisticsApi::new(app_data.clone()),
            ActivitiesApi::new(app_data.clone()),
            UpdatesApi::new(app_data.clone()),
            MobileApi::new(app_data.clone()),
            IotApi::new(app_data.clone()),
        ),
        "SmartLighting API",
        "1.0",
    )
    .description("Park lantern infrastructure administration")
    .server(format!("http://{}", settings.bind_addr));

    let ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/swagger", ui)
        .nest("/", api_service)
        .with(Cors::new());

    tracing::info!("Starting server on http://{}", settings.bind_addr);
    tracing::info!("Swagger UI available at http://{}/swagger", settings.bind_addr);

    Server::new(TcpListener::bind(settings.bind_addr.clone()))
        .run(app)
        .await
}
