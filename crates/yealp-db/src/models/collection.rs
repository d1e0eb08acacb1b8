//! Collection database models

use chrono::NaiveDate;
use sqlx::FromRow;

/// Row of `collection_of_user`
#[derive(Debug, Clone, FromRow)]
pub struct CollectionModel {
    pub user_id: String,
    pub collection_id: i32,
    pub created_date: NaiveDate,
}

/// Collection with owner name and counts
#[derive(Debug, Clone, FromRow)]
pub struct CollectionSummaryModel {
    #[sqlx(flatten)]
    pub collection: CollectionModel,
    pub owner_name: String,
    pub business_count: i64,
    pub fan_count: i64,
}

/// One of the owner's collections and whether it holds a given business
#[derive(Debug, Clone, FromRow)]
pub struct MembershipModel {
    pub collection_id: i32,
    pub contains_business: bool,
}
