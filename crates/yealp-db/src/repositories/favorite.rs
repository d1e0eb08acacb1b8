//! PostgreSQL implementation of FavoriteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use yealp_core::entities::Business;
use yealp_core::error::DomainError;
use yealp_core::traits::{FavoriteRepository, RepoResult};
use yealp_core::value_objects::{BusinessId, ToggleOutcome, UserId};

use crate::models::BusinessModel;

use super::edge::toggle_edge;
use super::error::{map_db_error, map_foreign_key_violation};

const INSERT_FAVORITE: &str = r"
    INSERT INTO users_favorite_business (user_id, business_id)
    VALUES ($1, $2)
    ON CONFLICT (user_id, business_id) DO NOTHING
";

const DELETE_FAVORITE: &str =
    "DELETE FROM users_favorite_business WHERE user_id = $1 AND business_id = $2";

/// PostgreSQL implementation of FavoriteRepository
#[derive(Clone)]
pub struct PgFavoriteRepository {
    pool: PgPool,
}

impl PgFavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PgFavoriteRepository {
    #[instrument(skip(self))]
    async fn is_favorite(&self, user_id: &UserId, business_id: &BusinessId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM users_favorite_business WHERE user_id = $1 AND business_id = $2
            )
            ",
        )
        .bind(user_id.as_str())
        .bind(business_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn toggle(
        &self,
        user_id: &UserId,
        business_id: &BusinessId,
    ) -> RepoResult<ToggleOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let change = toggle_edge(
            &mut tx,
            sqlx::query(DELETE_FAVORITE)
                .bind(user_id.as_str())
                .bind(business_id.as_str()),
            sqlx::query(INSERT_FAVORITE)
                .bind(user_id.as_str())
                .bind(business_id.as_str()),
        )
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::BusinessNotFound(business_id.clone())))?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(change.outcome)
    }

    #[instrument(skip(self))]
    async fn set(
        &self,
        user_id: &UserId,
        business_id: &BusinessId,
        active: bool,
    ) -> RepoResult<bool> {
        let statement = if active { INSERT_FAVORITE } else { DELETE_FAVORITE };
        let result = sqlx::query(statement)
            .bind(user_id.as_str())
            .bind(business_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_foreign_key_violation(e, || DomainError::BusinessNotFound(business_id.clone()))
            })?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: &UserId) -> RepoResult<Vec<Business>> {
        let results = sqlx::query_as::<_, BusinessModel>(
            r"
            SELECT b.business_id, b.name, b.address, b.city, b.state, b.postal_code,
                   b.is_open, b.is_takeout, b.average_stars, b.n_detailed_review
            FROM users_favorite_business f
            JOIN business_wide b ON b.business_id = f.business_id
            WHERE f.user_id = $1
            ORDER BY b.name, b.business_id
            ",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Business::from).collect())
    }
}
