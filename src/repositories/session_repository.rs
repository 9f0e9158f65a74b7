use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::entities::revoked_session;
use crate::utils::jwt::SessionClaims;

/// Tracks logged-out session tokens until they would have expired anyway.
pub struct SessionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SessionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn is_revoked(&self, jti: &str) -> Result<bool> {
        let count = revoked_session::Entity::find()
            .filter(revoked_session::Column::Jti.eq(jti))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn revoke(&self, user_id: i32, claims: &SessionClaims) -> Result<()> {
        if self.is_revoked(&claims.jti).await? {
            return Ok(());
        }

        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .map(|at| at.naive_utc())
            .unwrap_or_else(|| Utc::now().naive_utc());

        let revoked = revoked_session::ActiveModel {
            jti: Set(claims.jti.clone()),
            user_id: Set(user_id),
            expires_at: Set(expires_at),
            revoked_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };
        revoked.insert(self.db).await?;
        Ok(())
    }

    /// Drops entries whose token can no longer pass signature validation.
    pub async fn purge_expired(&self, now: NaiveDateTime) -> Result<u64> {
        let result = revoked_session::Entity::delete_many()
            .filter(revoked_session::Column::ExpiresAt.lt(now))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
