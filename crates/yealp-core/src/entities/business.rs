//! Business entity - a restaurant seeded from the dataset

use crate::value_objects::BusinessId;

/// Business with its review aggregates from the `business_wide` view
#[derive(Debug, Clone, PartialEq)]
pub struct Business {
    pub id: BusinessId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: Option<String>,
    pub is_open: bool,
    pub is_takeout: bool,
    /// Mean stars of detailed reviews, `None` when nobody reviewed it yet
    pub average_stars: Option<f64>,
    pub review_count: i64,
}

impl Business {
    /// One-line address for display
    pub fn full_address(&self) -> String {
        match &self.postal_code {
            Some(zip) => format!("{}, {}, {} {}", self.address, self.city, self.state, zip),
            None => format!("{}, {}, {}", self.address, self.city, self.state),
        }
    }

    #[inline]
    pub fn is_rated(&self) -> bool {
        self.average_stars.is_some()
    }
}
