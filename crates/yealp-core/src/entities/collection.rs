//! Collection entity - a user's named list of businesses

use chrono::{NaiveDate, Utc};

use crate::value_objects::{CollectionId, UserId};

/// Collection keyed by `(owner_id, id)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub owner_id: UserId,
    pub id: CollectionId,
    pub created_date: NaiveDate,
}

impl Collection {
    pub fn new(owner_id: UserId, id: CollectionId) -> Self {
        Self {
            owner_id,
            id,
            created_date: Utc::now().date_naive(),
        }
    }
}

/// Collection with the aggregates shown on listing pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub collection: Collection,
    pub owner_name: String,
    pub business_count: i64,
    pub fan_count: i64,
}

impl CollectionSummary {
    /// Display name, e.g. `Collection NO.2 with 5 restaurants`
    pub fn display_name(&self) -> String {
        format!(
            "Collection NO.{} with {} restaurants",
            self.collection.id, self.business_count
        )
    }
}

/// Whether one of the viewer's collections contains a given business
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionMembership {
    pub collection_id: CollectionId,
    pub contains_business: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let summary = CollectionSummary {
            collection: Collection::new(UserId::new("u1"), CollectionId::new(2)),
            owner_name: "alice".to_string(),
            business_count: 5,
            fan_count: 0,
        };
        assert_eq!(summary.display_name(), "Collection NO.2 with 5 restaurants");
    }
}
