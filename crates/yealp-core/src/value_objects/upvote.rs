//! Upvote types - the closed set of per-review vote counters

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::ReviewKind;
use crate::error::DomainError;

/// A vote a user can cast on a review or tip.
///
/// Each variant owns one counter column. `Useful`, `Funny` and `Cool`
/// apply to detailed reviews, `Likes` applies to tips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpvoteType {
    Useful,
    Funny,
    Cool,
    Likes,
}

impl UpvoteType {
    pub const ALL: [Self; 4] = [Self::Useful, Self::Funny, Self::Cool, Self::Likes];

    /// Name used in URLs and API payloads
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Useful => "useful",
            Self::Funny => "funny",
            Self::Cool => "cool",
            Self::Likes => "likes",
        }
    }

    /// Tag stored in the `users_upvote_review.upvote_type` column
    pub const fn edge_tag(self) -> &'static str {
        match self {
            Self::Useful => "useful",
            Self::Funny => "funny",
            Self::Cool => "cool",
            Self::Likes => "like",
        }
    }

    /// Reverse of [`UpvoteType::edge_tag`]
    pub fn from_edge_tag(tag: &str) -> Option<Self> {
        match tag {
            "useful" => Some(Self::Useful),
            "funny" => Some(Self::Funny),
            "cool" => Some(Self::Cool),
            "like" => Some(Self::Likes),
            _ => None,
        }
    }

    /// Whether this vote can be cast on an entry of the given kind
    pub const fn applies_to(self, kind: ReviewKind) -> bool {
        matches!(
            (self, kind),
            (Self::Likes, ReviewKind::Tip)
                | (Self::Useful | Self::Funny | Self::Cool, ReviewKind::Detailed)
        )
    }
}

impl fmt::Display for UpvoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpvoteType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "useful" => Ok(Self::Useful),
            "funny" => Ok(Self::Funny),
            "cool" => Ok(Self::Cool),
            "likes" => Ok(Self::Likes),
            other => Err(DomainError::InvalidUpvoteType(other.to_string())),
        }
    }
}
