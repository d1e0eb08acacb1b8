//! Restaurant search filters

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Number of rows returned by listing pages and the random fallback
pub const LISTING_LIMIT: i64 = 50;

/// Sort key for the filtered restaurant listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderRule {
    #[default]
    Name,
    AverageStars,
    #[serde(rename = "n_detailed_review")]
    ReviewCount,
}

impl OrderRule {
    pub const ALL: [Self; 3] = [Self::Name, Self::AverageStars, Self::ReviewCount];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::AverageStars => "average_stars",
            Self::ReviewCount => "n_detailed_review",
        }
    }

    /// Human label shown next to the choice
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::AverageStars => "Average stars",
            Self::ReviewCount => "Number of reviews",
        }
    }

    /// Names sort ascending, ratings and counts best-first
    pub const fn is_descending(self) -> bool {
        !matches!(self, Self::Name)
    }
}

impl fmt::Display for OrderRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderRule {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "average_stars" => Ok(Self::AverageStars),
            "n_detailed_review" => Ok(Self::ReviewCount),
            other => Err(DomainError::InvalidOrderRule(other.to_string())),
        }
    }
}

/// Filter for the restaurant listing.
///
/// The boolean flags narrow the listing when set and are ignored otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessFilter {
    pub state: String,
    pub takeout_only: bool,
    pub open_only: bool,
    pub order: OrderRule,
}

impl BusinessFilter {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            takeout_only: false,
            open_only: false,
            order: OrderRule::default(),
        }
    }

    /// Canonical listing path for this filter, e.g.
    /// `/restaurants/AZ/is_takeout:True/is_open:False/order_by:name`
    pub fn listing_path(&self) -> String {
        format!(
            "/restaurants/{}/is_takeout:{}/is_open:{}/order_by:{}",
            self.state,
            flag_label(self.takeout_only),
            flag_label(self.open_only),
            self.order
        )
    }
}

const fn flag_label(flag: bool) -> &'static str {
    if flag {
        "True"
    } else {
        "False"
    }
}
