use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use sms::bootstrap::{initialize_admin_user, purge_expired_sessions};
use sms::config::{AppSettings, Config};
use sms::db::{get_database_connection, run_migrations};
use sms::state::AppState;
use sms::{app, utils::tracing::init_standard_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::parse();

    init_standard_tracing(env!("CARGO_CRATE_NAME"), &config.log_level);

    tracing::info!("Starting application...");

    let db_connection = get_database_connection(&config.database_url).await?;

    if config.run_migrations {
        run_migrations(&db_connection).await?;
    }

    if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
        tracing::info!("Checking admin user...");
        if let Err(e) =
            initialize_admin_user(&db_connection, username, password, config.bcrypt_cost).await
        {
            tracing::error!("Failed to initialize admin user: {:#}", e);
            tracing::warn!("Continuing without admin user initialization...");
        }
    }

    if let Err(e) = purge_expired_sessions(&db_connection).await {
        tracing::warn!("{:#}", e);
    }

    let state = AppState::new(db_connection, AppSettings::from(&config));
    let app = app::create_app(state)?;

    let http_address = format!("0.0.0.0:{}", config.port);
    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(&http_address)
        .await
        .with_context(|| format!("Failed to bind {http_address}"))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server error")?;

    Ok(())
}
