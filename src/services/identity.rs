use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;

/// Resolves a session credential to a user identity
///
/// Seam for the external identity provider: handlers consume a "current
/// user" capability and never inspect credentials themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the user id for a live session token, `None` when the token
    /// is unknown or expired
    async fn resolve(&self, token: String) -> AppResult<Option<Uuid>>;
}

/// Postgres-backed session lookup
#[derive(Clone)]
pub struct PgIdentityProvider {
    pool: PgPool,
}

impl PgIdentityProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityProvider for PgIdentityProvider {
    async fn resolve(&self, token: String) -> AppResult<Option<Uuid>> {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM user_sessions WHERE token = $1 AND expires_at > now()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user_id)
    }
}
