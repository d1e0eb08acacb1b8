//! Review database models

use chrono::NaiveDate;
use sqlx::FromRow;

/// Row of the `reviews_wide` view
#[derive(Debug, Clone, FromRow)]
pub struct ReviewModel {
    pub review_id: i64,
    pub business_id: String,
    pub review_date: NaiveDate,
    pub detailed_review: Option<String>,
    pub short_tip: Option<String>,
    pub stars: Option<f64>,
    pub useful: i32,
    pub funny: i32,
    pub cool: i32,
    pub likes: i32,
    pub user_id: String,
    pub user_name: String,
}

/// Review joined with the name of the reviewed business
#[derive(Debug, Clone, FromRow)]
pub struct AuthoredReviewModel {
    #[sqlx(flatten)]
    pub review: ReviewModel,
    pub business_name: String,
}

/// Row of `users_upvote_review` for one viewer
#[derive(Debug, Clone, FromRow)]
pub struct UpvoteModel {
    pub review_id: i64,
    pub upvote_type: String,
}
