//! PostgreSQL implementation of ReviewRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use yealp_core::entities::{AuthoredReview, NewReview, Review, VoteCounts};
use yealp_core::error::DomainError;
use yealp_core::traits::{RepoResult, ReviewRepository};
use yealp_core::value_objects::{BusinessId, ReviewId, UserId};

use crate::mappers::ReviewInsert;
use crate::models::{AuthoredReviewModel, ReviewModel};

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of ReviewRepository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<Review>> {
        let result = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT review_id, business_id, review_date, detailed_review, short_tip, stars,
                   useful, funny, cool, likes, user_id, user_name
            FROM reviews_wide
            WHERE review_id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Review::from))
    }

    #[instrument(skip(self))]
    async fn find_detailed_by_business(
        &self,
        business_id: &BusinessId,
    ) -> RepoResult<Vec<Review>> {
        let results = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT review_id, business_id, review_date, detailed_review, short_tip, stars,
                   useful, funny, cool, likes, user_id, user_name
            FROM reviews_wide
            WHERE business_id = $1 AND detailed_review IS NOT NULL
            ORDER BY review_date DESC, review_id DESC
            ",
        )
        .bind(business_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Review::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_tips_by_business(&self, business_id: &BusinessId) -> RepoResult<Vec<Review>> {
        let results = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT review_id, business_id, review_date, detailed_review, short_tip, stars,
                   useful, funny, cool, likes, user_id, user_name
            FROM tips_wide
            WHERE business_id = $1
            ORDER BY review_date DESC, review_id DESC
            ",
        )
        .bind(business_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Review::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, author_id: &UserId) -> RepoResult<Vec<AuthoredReview>> {
        let results = sqlx::query_as::<_, AuthoredReviewModel>(
            r"
            SELECT r.review_id, r.business_id, r.review_date, r.detailed_review, r.short_tip,
                   r.stars, r.useful, r.funny, r.cool, r.likes, r.user_id, r.user_name,
                   b.name AS business_name
            FROM reviews_wide r
            JOIN business b ON b.business_id = r.business_id
            WHERE r.user_id = $1
            ORDER BY r.review_date DESC, r.review_id DESC
            ",
        )
        .bind(author_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(AuthoredReview::from).collect())
    }

    #[instrument(skip(self, review), fields(business_id = %review.business_id, author_id = %review.author_id))]
    async fn create(&self, review: &NewReview) -> RepoResult<Review> {
        let insert = ReviewInsert::new(review);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let review_id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO review_of_business (business_id, review_date, detailed_review, short_tip, stars)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING review_id
            ",
        )
        .bind(insert.business_id)
        .bind(review.review_date)
        .bind(insert.detailed_review)
        .bind(insert.short_tip)
        .bind(insert.stars)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || DomainError::BusinessNotFound(review.business_id.clone()))
        })?;

        sqlx::query("INSERT INTO users_write_review (review_id, user_id) VALUES ($1, $2)")
            .bind(review_id)
            .bind(review.author_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                map_foreign_key_violation(e, || DomainError::UserNotFound(review.author_id.clone()))
            })?;

        let author_name =
            sqlx::query_scalar::<_, String>("SELECT name FROM users WHERE user_id = $1")
                .bind(review.author_id.as_str())
                .fetch_one(&mut *tx)
                .await
                .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        debug!(review_id, "Review stored");

        Ok(Review {
            id: ReviewId::new(review_id),
            business_id: review.business_id.clone(),
            author_id: review.author_id.clone(),
            author_name,
            content: review.content.clone(),
            review_date: review.review_date,
            votes: VoteCounts::default(),
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ReviewId) -> RepoResult<bool> {
        // Authorship, upvote edges cascade with the review row
        let result = sqlx::query("DELETE FROM review_of_business WHERE review_id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
