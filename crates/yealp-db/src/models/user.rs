//! User database model

use chrono::NaiveDate;
use sqlx::FromRow;

/// Row of the `users` table, without the password hash
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub yealping_since: NaiveDate,
    pub account_img_file: String,
}

/// Followed user joined with the follow date
#[derive(Debug, Clone, FromRow)]
pub struct FolloweeModel {
    #[sqlx(flatten)]
    pub user: UserModel,
    pub follow_since: NaiveDate,
}
