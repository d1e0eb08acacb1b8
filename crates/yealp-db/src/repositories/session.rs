//! PostgreSQL implementation of SessionRepository
//!
//! Sessions back the access tokens: a token is only honored while its
//! session row exists, is unexpired and has not been revoked.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use yealp_core::entities::Session;
use yealp_core::error::DomainError;
use yealp_core::traits::{RepoResult, SessionRepository};
use yealp_core::value_objects::UserId;

use crate::models::SessionModel;

use super::error::{map_db_error, map_foreign_key_violation};

#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    #[instrument(skip(self, session), fields(session_id = %session.id, user_id = %session.user_id))]
    async fn create(&self, session: &Session) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_sessions (session_id, user_id, created_at, expires_at, revoked_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(session.id)
        .bind(session.user_id.as_str())
        .bind(session.created_at)
        .bind(session.expires_at)
        .bind(session.revoked_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::UserNotFound(session.user_id.clone())))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Session>> {
        let result = sqlx::query_as::<_, SessionModel>(
            r"
            SELECT session_id, user_id, created_at, expires_at, revoked_at
            FROM user_sessions
            WHERE session_id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if let Some(model) = result.as_ref().filter(|m| m.is_revoked()) {
            debug!(session_id = %model.session_id, "Session was revoked");
        }

        Ok(result.map(Session::from))
    }

    #[instrument(skip(self))]
    async fn revoke(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE user_sessions SET revoked_at = NOW() WHERE session_id = $1 AND revoked_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn revoke_all_for_user(&self, user_id: &UserId) -> RepoResult<u64> {
        let result = sqlx::query(
            "UPDATE user_sessions SET revoked_at = NOW() WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
