//! Business model → entity mapper

use yealp_core::entities::Business;
use yealp_core::value_objects::BusinessId;

use crate::models::BusinessModel;

impl From<BusinessModel> for Business {
    fn from(model: BusinessModel) -> Self {
        Business {
            id: BusinessId::new(model.business_id),
            name: model.name,
            address: model.address,
            city: model.city,
            state: model.state,
            postal_code: model.postal_code,
            is_open: model.is_open,
            is_takeout: model.is_takeout,
            average_stars: model.average_stars,
            review_count: model.n_detailed_review,
        }
    }
}
