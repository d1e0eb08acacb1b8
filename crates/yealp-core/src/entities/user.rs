//! User entity - represents a Yealp account

use chrono::{NaiveDate, Utc};

use crate::value_objects::UserId;

/// User entity. The password hash is kept out of the entity and only read
/// through [`crate::traits::UserRepository::get_password_hash`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub yealping_since: NaiveDate,
    pub image_file: String,
}

impl User {
    /// Avatar file every account starts with
    pub const DEFAULT_IMAGE: &'static str = "default.jpg";

    /// Create a new account joining today with the default avatar
    pub fn new(id: UserId, name: String, email: String) -> Self {
        Self {
            id,
            name,
            email,
            yealping_since: Utc::now().date_naive(),
            image_file: Self::DEFAULT_IMAGE.to_string(),
        }
    }

    /// Public URL of the avatar
    pub fn image_url(&self) -> String {
        format!("/static/profile_pics/{}", self.image_file)
    }

    pub fn set_profile(&mut self, name: String, email: String) {
        self.name = name;
        self.email = email;
    }

    pub fn set_image_file(&mut self, file: String) {
        self.image_file = file;
    }
}

/// A user the viewer follows, with the date the follow started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Followee {
    pub user: User,
    pub follow_since: NaiveDate,
}
