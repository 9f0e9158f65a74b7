use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::repositories::{SessionRepository, UserRepository};

/// Creates the first login account when the credentials are configured and
/// no user with that name exists yet.
pub async fn initialize_admin_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    bcrypt_cost: u32,
) -> Result<()> {
    let user_repo = UserRepository::new(db);

    if user_repo
        .exists_by_username(username)
        .await
        .context("Failed to check existing admin")?
    {
        tracing::info!("Admin user already exists, skipping initialization");
        return Ok(());
    }

    tracing::info!("Creating default admin user...");

    let hashed_password =
        bcrypt::hash(password, bcrypt_cost).context("Failed to hash admin password")?;

    let admin = user_repo
        .create(username.to_string(), hashed_password)
        .await
        .context("Failed to insert admin user")?;

    tracing::info!("Admin user {} created with id {}", admin.username, admin.user_id);
    tracing::warn!("Please change the default password after first login!");

    Ok(())
}

/// Drops revoked-session rows whose tokens have expired anyway.
pub async fn purge_expired_sessions(db: &DatabaseConnection) -> Result<()> {
    let purged = SessionRepository::new(db)
        .purge_expired(Utc::now().naive_utc())
        .await
        .context("Failed to purge expired sessions")?;

    if purged > 0 {
        tracing::info!("Purged {} expired revoked sessions", purged);
    }
    Ok(())
}
