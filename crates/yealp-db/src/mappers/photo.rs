//! Photo model → entity mapper

use yealp_core::entities::Photo;
use yealp_core::value_objects::{BusinessId, PhotoId, UserId};

use crate::models::PhotoModel;

impl From<PhotoModel> for Photo {
    fn from(model: PhotoModel) -> Self {
        Photo {
            id: PhotoId::new(model.photo_id),
            business_id: BusinessId::new(model.business_id),
            uploaded_by: model.uploaded_by.map(UserId::new),
            created_at: model.created_at,
        }
    }
}
