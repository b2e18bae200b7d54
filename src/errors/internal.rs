use thiserror::Error;

/// Startup and configuration failures surfaced before the API layer exists
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("missing environment variable {0}")]
    MissingEnv(String),

    #[error("invalid value for environment variable {name}: {value}")]
    InvalidEnv { name: String, value: String },

    #[error("database error during {operation}: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> Self {
        InternalError::Database {
            operation: operation.to_string(),
            source,
        }
    }
}
