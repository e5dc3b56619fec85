use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, RetryConfig, retry_with_backoff};

/// Connect with exponential backoff, for startup ordering against a database
/// that may not be accepting connections yet.
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DatabaseError> {
    let options = config.into_connect_options();

    retry_with_backoff(
        || {
            let opts = options.clone();
            async move { Database::connect(opts).await }
        },
        retry_config.unwrap_or_default(),
    )
    .await
    .map(|db| {
        info!("Connected to PostgreSQL");
        db
    })
    .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))
}

/// Apply all pending migrations of `M`
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DatabaseError> {
    info!(app = app_name, "Running database migrations");
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
    info!(app = app_name, "Migrations completed");
    Ok(())
}
