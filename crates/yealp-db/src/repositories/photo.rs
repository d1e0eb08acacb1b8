//! PostgreSQL implementation of PhotoRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use yealp_core::entities::Photo;
use yealp_core::error::DomainError;
use yealp_core::traits::{PhotoRepository, RepoResult};
use yealp_core::value_objects::BusinessId;

use crate::models::PhotoModel;

use super::error::{map_db_error, map_foreign_key_violation};

#[derive(Clone)]
pub struct PgPhotoRepository {
    pool: PgPool,
}

impl PgPhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotoRepository for PgPhotoRepository {
    #[instrument(skip(self, photo), fields(photo_id = %photo.id, business_id = %photo.business_id))]
    async fn create(&self, photo: &Photo) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO photo_contained_business (photo_id, business_id, uploaded_by, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(photo.id.as_str())
        .bind(photo.business_id.as_str())
        .bind(photo.uploaded_by.as_ref().map(|id| id.as_str()))
        .bind(photo.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || DomainError::BusinessNotFound(photo.business_id.clone()))
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_business(&self, business_id: &BusinessId) -> RepoResult<Vec<Photo>> {
        let results = sqlx::query_as::<_, PhotoModel>(
            r"
            SELECT photo_id, business_id, uploaded_by, created_at
            FROM photo_contained_business
            WHERE business_id = $1
            ORDER BY created_at DESC, photo_id
            ",
        )
        .bind(business_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Photo::from).collect())
    }
}
