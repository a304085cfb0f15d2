pub mod models;
pub mod packages;
pub mod payments;
pub mod reports;
pub mod users;
pub mod vehicles;

use crate::config::Config;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

pub use packages::PgPackageRepository;
pub use payments::PgPaymentRepository;
pub use reports::PgReportRepository;
pub use users::PgUserRepository;
pub use vehicles::PgVehicleRepository;

/// Migrations embedded at compile time from `./migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations completed");
    Ok(())
}
