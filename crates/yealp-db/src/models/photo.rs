//! Photo database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of `photo_contained_business`
#[derive(Debug, Clone, FromRow)]
pub struct PhotoModel {
    pub photo_id: String,
    pub business_id: String,
    pub uploaded_by: Option<String>,
    pub created_at: DateTime<Utc>,
}
