//! Photo entity - an image attached to a business

use chrono::{DateTime, Utc};

use crate::value_objects::{BusinessId, PhotoId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: PhotoId,
    pub business_id: BusinessId,
    pub uploaded_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Photo {
    pub fn new(id: PhotoId, business_id: BusinessId, uploaded_by: UserId) -> Self {
        Self {
            id,
            business_id,
            uploaded_by: Some(uploaded_by),
            created_at: Utc::now(),
        }
    }

    /// Stored file name; business photos are always JPEG
    pub fn file_name(&self) -> String {
        format!("{}.jpg", self.id)
    }

    pub fn url(&self) -> String {
        format!("/static/business_photos/{}", self.file_name())
    }
}
