//! PostgreSQL implementation of CollectionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument, warn};

use yealp_core::entities::{Business, Collection, CollectionMembership, CollectionSummary};
use yealp_core::error::DomainError;
use yealp_core::traits::{CollectionRepository, RepoResult};
use yealp_core::value_objects::{BusinessId, CollectionId, UserId};

use crate::models::{BusinessModel, CollectionModel, CollectionSummaryModel, MembershipModel};

use super::error::{is_unique_violation, map_db_error, map_foreign_key_violation};

/// Attempts before giving up on a numbering conflict
const MAX_CREATE_ATTEMPTS: usize = 3;

/// Summary columns for rows of `collection_of_user c` joined with `users u`
const SUMMARY_COLUMNS: &str = r"
    c.user_id, c.collection_id, c.created_date,
    u.name AS owner_name,
    (SELECT COUNT(*) FROM collection_contain_business cb
      WHERE cb.collection_owner_id = c.user_id
        AND cb.collection_id = c.collection_id) AS business_count,
    (SELECT COUNT(*) FROM users_follow_collection fc
      WHERE fc.followee_user_id = c.user_id
        AND fc.collection_id = c.collection_id) AS fan_count
";

/// PostgreSQL implementation of CollectionRepository
#[derive(Clone)]
pub struct PgCollectionRepository {
    pool: PgPool,
}

impl PgCollectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Take the next number from the owner's counter row and insert the
    /// collection. The counter row lock is held until commit, so concurrent
    /// creations for one owner are serialized.
    async fn try_create(&self, owner_id: &UserId) -> Result<Collection, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let next_id = sqlx::query_scalar::<_, i32>(
            r"
            INSERT INTO collection_counters (user_id, last_collection_id)
            VALUES (
                $1,
                (SELECT COALESCE(MAX(collection_id), 0) + 1
                 FROM collection_of_user WHERE user_id = $1)
            )
            ON CONFLICT (user_id)
            DO UPDATE SET last_collection_id = collection_counters.last_collection_id + 1
            RETURNING last_collection_id
            ",
        )
        .bind(owner_id.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, CollectionModel>(
            r"
            INSERT INTO collection_of_user (user_id, collection_id)
            VALUES ($1, $2)
            RETURNING user_id, collection_id, created_date
            ",
        )
        .bind(owner_id.as_str())
        .bind(next_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }
}

#[async_trait]
impl CollectionRepository for PgCollectionRepository {
    #[instrument(skip(self))]
    async fn create(&self, owner_id: &UserId) -> RepoResult<Collection> {
        for attempt in 1..=MAX_CREATE_ATTEMPTS {
            match self.try_create(owner_id).await {
                Ok(collection) => {
                    debug!(collection_id = %collection.id, "Collection created");
                    return Ok(collection);
                }
                Err(e) if is_unique_violation(&e) => {
                    warn!(attempt, "Collection number already taken, retrying");
                }
                Err(e) => {
                    return Err(map_foreign_key_violation(e, || {
                        DomainError::UserNotFound(owner_id.clone())
                    }));
                }
            }
        }

        Err(DomainError::CollectionNumberConflict)
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        owner_id: &UserId,
        collection_id: CollectionId,
    ) -> RepoResult<Option<CollectionSummary>> {
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} FROM collection_of_user c \
             JOIN users u ON u.user_id = c.user_id \
             WHERE c.user_id = $1 AND c.collection_id = $2"
        );
        let result = sqlx::query_as::<_, CollectionSummaryModel>(&sql)
            .bind(owner_id.as_str())
            .bind(collection_id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(CollectionSummary::from))
    }

    #[instrument(skip(self))]
    async fn find_by_owner(&self, owner_id: &UserId) -> RepoResult<Vec<CollectionSummary>> {
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} FROM collection_of_user c \
             JOIN users u ON u.user_id = c.user_id \
             WHERE c.user_id = $1 \
             ORDER BY c.collection_id"
        );
        let results = sqlx::query_as::<_, CollectionSummaryModel>(&sql)
            .bind(owner_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(CollectionSummary::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_businesses(
        &self,
        owner_id: &UserId,
        collection_id: CollectionId,
    ) -> RepoResult<Vec<Business>> {
        let results = sqlx::query_as::<_, BusinessModel>(
            r"
            SELECT b.business_id, b.name, b.address, b.city, b.state, b.postal_code,
                   b.is_open, b.is_takeout, b.average_stars, b.n_detailed_review
            FROM collection_contain_business cb
            JOIN business_wide b ON b.business_id = cb.business_id
            WHERE cb.collection_owner_id = $1 AND cb.collection_id = $2
            ORDER BY b.name, b.business_id
            ",
        )
        .bind(owner_id.as_str())
        .bind(collection_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Business::from).collect())
    }

    #[instrument(skip(self))]
    async fn memberships(
        &self,
        owner_id: &UserId,
        business_id: &BusinessId,
    ) -> RepoResult<Vec<CollectionMembership>> {
        let results = sqlx::query_as::<_, MembershipModel>(
            r"
            SELECT c.collection_id,
                   EXISTS(
                       SELECT 1 FROM collection_contain_business cb
                       WHERE cb.collection_owner_id = c.user_id
                         AND cb.collection_id = c.collection_id
                         AND cb.business_id = $2
                   ) AS contains_business
            FROM collection_of_user c
            WHERE c.user_id = $1
            ORDER BY c.collection_id
            ",
        )
        .bind(owner_id.as_str())
        .bind(business_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(CollectionMembership::from).collect())
    }

    #[instrument(skip(self))]
    async fn replace_memberships(
        &self,
        owner_id: &UserId,
        business_id: &BusinessId,
        collection_ids: &[CollectionId],
    ) -> RepoResult<()> {
        let ids: Vec<i32> = collection_ids.iter().map(|id| id.into_inner()).collect();
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let removed = sqlx::query(
            r"
            DELETE FROM collection_contain_business
            WHERE collection_owner_id = $1
              AND business_id = $2
              AND NOT (collection_id = ANY($3))
            ",
        )
        .bind(owner_id.as_str())
        .bind(business_id.as_str())
        .bind(&ids)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        // Ids the owner does not have drop out of the SELECT
        let added = sqlx::query(
            r"
            INSERT INTO collection_contain_business (collection_owner_id, collection_id, business_id)
            SELECT c.user_id, c.collection_id, $2
            FROM collection_of_user c
            WHERE c.user_id = $1 AND c.collection_id = ANY($3)
            ON CONFLICT (collection_owner_id, collection_id, business_id) DO NOTHING
            ",
        )
        .bind(owner_id.as_str())
        .bind(business_id.as_str())
        .bind(&ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || DomainError::BusinessNotFound(business_id.clone()))
        })?
        .rows_affected();

        tx.commit().await.map_err(map_db_error)?;
        debug!(removed, added, "Collection memberships replaced");

        Ok(())
    }
}
