use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use domain_tasks::{PgTaskRepository, TaskService};
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    run_migrations::<Migrator>(&db, config.app.name).await?;

    let service = TaskService::new(PgTaskRepository::new(db.clone()));

    // Health and readiness sit at the root, inside the same middleware as /api
    let root = health_router(config.app).merge(api::ready_router(db.clone()));
    let app = create_router::<openapi::ApiDoc>(api::routes(service), root, &config.server)?;

    info!(
        "Starting {} with graceful shutdown ({:?} cleanup window)",
        config.app.name, config.server.shutdown_timeout
    );

    create_production_app(app, &config.server, async move {
        info!("Shutting down: closing database connections");
        match db.close().await {
            Ok(()) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Tasks API shutdown complete");
    Ok(())
}
