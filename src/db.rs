use std::time::Duration;

use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub async fn get_database_connection(database_url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    // Every pooled connection to an in-memory SQLite database sees its own empty database
    if database_url.starts_with("sqlite") && database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    } else {
        options.max_connections(20).min_connections(2);
    }

    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Database connection established");
    Ok(db)
}

pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None)
        .await
        .context("Failed to apply database migrations")?;
    tracing::info!("Database migrations applied");
    Ok(())
}
