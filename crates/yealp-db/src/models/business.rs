//! Business database model

use sqlx::FromRow;

/// Row of the `business_wide` view
#[derive(Debug, Clone, FromRow)]
pub struct BusinessModel {
    pub business_id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: Option<String>,
    pub is_open: bool,
    pub is_takeout: bool,
    pub average_stars: Option<f64>,
    pub n_detailed_review: i64,
}
