//! PostgreSQL implementation of FollowRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use yealp_core::entities::{CollectionSummary, Followee};
use yealp_core::error::DomainError;
use yealp_core::traits::{FollowRepository, RepoResult};
use yealp_core::value_objects::{CollectionId, ToggleOutcome, UserId};

use crate::models::{CollectionSummaryModel, FolloweeModel};

use super::edge::toggle_edge;
use super::error::{map_db_error, map_edge_violation, map_foreign_key_violation};

const INSERT_USER_FOLLOW: &str = r"
    INSERT INTO users_follow_users (followee_user_id, fan_user_id)
    VALUES ($1, $2)
    ON CONFLICT (followee_user_id, fan_user_id) DO NOTHING
";

const DELETE_USER_FOLLOW: &str =
    "DELETE FROM users_follow_users WHERE followee_user_id = $1 AND fan_user_id = $2";

const INSERT_COLLECTION_FOLLOW: &str = r"
    INSERT INTO users_follow_collection (fan_user_id, followee_user_id, collection_id)
    VALUES ($1, $2, $3)
    ON CONFLICT (fan_user_id, followee_user_id, collection_id) DO NOTHING
";

const DELETE_COLLECTION_FOLLOW: &str = r"
    DELETE FROM users_follow_collection
    WHERE fan_user_id = $1 AND followee_user_id = $2 AND collection_id = $3
";

/// PostgreSQL implementation of FollowRepository
#[derive(Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    #[instrument(skip(self))]
    async fn is_following_user(&self, fan_id: &UserId, followee_id: &UserId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM users_follow_users
                WHERE followee_user_id = $1 AND fan_user_id = $2
            )
            ",
        )
        .bind(followee_id.as_str())
        .bind(fan_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn toggle_user(
        &self,
        fan_id: &UserId,
        followee_id: &UserId,
    ) -> RepoResult<ToggleOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let change = toggle_edge(
            &mut tx,
            sqlx::query(DELETE_USER_FOLLOW)
                .bind(followee_id.as_str())
                .bind(fan_id.as_str()),
            sqlx::query(INSERT_USER_FOLLOW)
                .bind(followee_id.as_str())
                .bind(fan_id.as_str()),
        )
        .await
        .map_err(|e| {
            map_edge_violation(
                e,
                || DomainError::CannotFollowSelf,
                || DomainError::UserNotFound(followee_id.clone()),
            )
        })?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(change.outcome)
    }

    #[instrument(skip(self))]
    async fn set_user(
        &self,
        fan_id: &UserId,
        followee_id: &UserId,
        active: bool,
    ) -> RepoResult<bool> {
        let statement = if active {
            INSERT_USER_FOLLOW
        } else {
            DELETE_USER_FOLLOW
        };
        let result = sqlx::query(statement)
            .bind(followee_id.as_str())
            .bind(fan_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_edge_violation(
                    e,
                    || DomainError::CannotFollowSelf,
                    || DomainError::UserNotFound(followee_id.clone()),
                )
            })?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn fan_count(&self, user_id: &UserId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users_follow_users WHERE followee_user_id = $1",
        )
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_followees(&self, fan_id: &UserId) -> RepoResult<Vec<Followee>> {
        let results = sqlx::query_as::<_, FolloweeModel>(
            r"
            SELECT u.user_id, u.name, u.email, u.yealping_since, u.account_img_file,
                   f.follow_since
            FROM users_follow_users f
            JOIN users u ON u.user_id = f.followee_user_id
            WHERE f.fan_user_id = $1
            ORDER BY f.follow_since DESC, u.name
            ",
        )
        .bind(fan_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Followee::from).collect())
    }

    #[instrument(skip(self))]
    async fn is_following_collection(
        &self,
        fan_id: &UserId,
        owner_id: &UserId,
        collection_id: CollectionId,
    ) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM users_follow_collection
                WHERE fan_user_id = $1 AND followee_user_id = $2 AND collection_id = $3
            )
            ",
        )
        .bind(fan_id.as_str())
        .bind(owner_id.as_str())
        .bind(collection_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn toggle_collection(
        &self,
        fan_id: &UserId,
        owner_id: &UserId,
        collection_id: CollectionId,
    ) -> RepoResult<ToggleOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let change = toggle_edge(
            &mut tx,
            sqlx::query(DELETE_COLLECTION_FOLLOW)
                .bind(fan_id.as_str())
                .bind(owner_id.as_str())
                .bind(collection_id.into_inner()),
            sqlx::query(INSERT_COLLECTION_FOLLOW)
                .bind(fan_id.as_str())
                .bind(owner_id.as_str())
                .bind(collection_id.into_inner()),
        )
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || DomainError::CollectionNotFound {
                owner: owner_id.clone(),
                id: collection_id,
            })
        })?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(change.outcome)
    }

    #[instrument(skip(self))]
    async fn set_collection(
        &self,
        fan_id: &UserId,
        owner_id: &UserId,
        collection_id: CollectionId,
        active: bool,
    ) -> RepoResult<bool> {
        let statement = if active {
            INSERT_COLLECTION_FOLLOW
        } else {
            DELETE_COLLECTION_FOLLOW
        };
        let result = sqlx::query(statement)
            .bind(fan_id.as_str())
            .bind(owner_id.as_str())
            .bind(collection_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_foreign_key_violation(e, || DomainError::CollectionNotFound {
                    owner: owner_id.clone(),
                    id: collection_id,
                })
            })?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn find_followed_collections(
        &self,
        fan_id: &UserId,
    ) -> RepoResult<Vec<CollectionSummary>> {
        let results = sqlx::query_as::<_, CollectionSummaryModel>(
            r"
            SELECT c.user_id, c.collection_id, c.created_date,
                   u.name AS owner_name,
                   (SELECT COUNT(*) FROM collection_contain_business cb
                     WHERE cb.collection_owner_id = c.user_id
                       AND cb.collection_id = c.collection_id) AS business_count,
                   (SELECT COUNT(*) FROM users_follow_collection fc
                     WHERE fc.followee_user_id = c.user_id
                       AND fc.collection_id = c.collection_id) AS fan_count
            FROM users_follow_collection f
            JOIN collection_of_user c
              ON c.user_id = f.followee_user_id AND c.collection_id = f.collection_id
            JOIN users u ON u.user_id = c.user_id
            WHERE f.fan_user_id = $1
            ORDER BY business_count DESC, u.name, c.collection_id
            ",
        )
        .bind(fan_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(CollectionSummary::from).collect())
    }
}
