//! PostgreSQL implementation of UpvoteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use yealp_core::error::DomainError;
use yealp_core::traits::{RepoResult, UpvoteRepository};
use yealp_core::value_objects::{BusinessId, ReviewId, ToggleOutcome, UpvoteType, UserId};

use crate::models::UpvoteModel;

use super::edge::toggle_edge;
use super::error::{map_db_error, map_foreign_key_violation};

/// Counter statement for one vote type and direction.
///
/// The column name comes from this table only; nothing from the request is
/// ever spliced into the statement text.
fn counter_sql(kind: UpvoteType, outcome: ToggleOutcome) -> &'static str {
    match (kind, outcome) {
        (UpvoteType::Useful, ToggleOutcome::Added) => {
            "UPDATE review_of_business SET useful = useful + 1 WHERE review_id = $1"
        }
        (UpvoteType::Useful, ToggleOutcome::Removed) => {
            "UPDATE review_of_business SET useful = GREATEST(useful - 1, 0) WHERE review_id = $1"
        }
        (UpvoteType::Funny, ToggleOutcome::Added) => {
            "UPDATE review_of_business SET funny = funny + 1 WHERE review_id = $1"
        }
        (UpvoteType::Funny, ToggleOutcome::Removed) => {
            "UPDATE review_of_business SET funny = GREATEST(funny - 1, 0) WHERE review_id = $1"
        }
        (UpvoteType::Cool, ToggleOutcome::Added) => {
            "UPDATE review_of_business SET cool = cool + 1 WHERE review_id = $1"
        }
        (UpvoteType::Cool, ToggleOutcome::Removed) => {
            "UPDATE review_of_business SET cool = GREATEST(cool - 1, 0) WHERE review_id = $1"
        }
        (UpvoteType::Likes, ToggleOutcome::Added) => {
            "UPDATE review_of_business SET likes = likes + 1 WHERE review_id = $1"
        }
        (UpvoteType::Likes, ToggleOutcome::Removed) => {
            "UPDATE review_of_business SET likes = GREATEST(likes - 1, 0) WHERE review_id = $1"
        }
    }
}

/// PostgreSQL implementation of UpvoteRepository
#[derive(Clone)]
pub struct PgUpvoteRepository {
    pool: PgPool,
}

impl PgUpvoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UpvoteRepository for PgUpvoteRepository {
    #[instrument(skip(self))]
    async fn toggle(
        &self,
        user_id: &UserId,
        review_id: ReviewId,
        kind: UpvoteType,
    ) -> RepoResult<ToggleOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let delete = sqlx::query(
            r"
            DELETE FROM users_upvote_review
            WHERE user_id = $1 AND review_id = $2 AND upvote_type = $3
            ",
        )
        .bind(user_id.as_str())
        .bind(review_id.into_inner())
        .bind(kind.edge_tag());

        let insert = sqlx::query(
            r"
            INSERT INTO users_upvote_review (user_id, review_id, upvote_type)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, review_id, upvote_type) DO NOTHING
            ",
        )
        .bind(user_id.as_str())
        .bind(review_id.into_inner())
        .bind(kind.edge_tag());

        let change = toggle_edge(&mut tx, delete, insert)
            .await
            .map_err(|e| map_foreign_key_violation(e, || DomainError::ReviewNotFound(review_id)))?;

        if change.changed {
            sqlx::query(counter_sql(kind, change.outcome))
                .bind(review_id.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;
        debug!(outcome = ?change.outcome, changed = change.changed, "Upvote toggled");

        Ok(change.outcome)
    }

    #[instrument(skip(self))]
    async fn find_by_user_for_business(
        &self,
        user_id: &UserId,
        business_id: &BusinessId,
    ) -> RepoResult<Vec<(ReviewId, UpvoteType)>> {
        let results = sqlx::query_as::<_, UpvoteModel>(
            r"
            SELECT v.review_id, v.upvote_type
            FROM users_upvote_review v
            JOIN review_of_business r ON r.review_id = v.review_id
            WHERE v.user_id = $1 AND r.business_id = $2
            ",
        )
        .bind(user_id.as_str())
        .bind(business_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results
            .into_iter()
            .filter_map(|row| {
                UpvoteType::from_edge_tag(&row.upvote_type)
                    .map(|kind| (ReviewId::new(row.review_id), kind))
            })
            .collect())
    }
}
