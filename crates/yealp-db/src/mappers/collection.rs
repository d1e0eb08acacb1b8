//! Collection model → entity mappers

use yealp_core::entities::{Collection, CollectionMembership, CollectionSummary};
use yealp_core::value_objects::{CollectionId, UserId};

use crate::models::{CollectionModel, CollectionSummaryModel, MembershipModel};

impl From<CollectionModel> for Collection {
    fn from(model: CollectionModel) -> Self {
        Collection {
            owner_id: UserId::new(model.user_id),
            id: CollectionId::new(model.collection_id),
            created_date: model.created_date,
        }
    }
}

impl From<CollectionSummaryModel> for CollectionSummary {
    fn from(model: CollectionSummaryModel) -> Self {
        CollectionSummary {
            collection: model.collection.into(),
            owner_name: model.owner_name,
            business_count: model.business_count,
            fan_count: model.fan_count,
        }
    }
}

impl From<MembershipModel> for CollectionMembership {
    fn from(model: MembershipModel) -> Self {
        CollectionMembership {
            collection_id: CollectionId::new(model.collection_id),
            contains_business: model.contains_business,
        }
    }
}
