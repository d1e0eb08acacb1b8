//! Review entity - a detailed review or a short tip on a business

use chrono::{NaiveDate, Utc};

use crate::value_objects::{BusinessId, ReviewId, StarRating, UpvoteType, UserId};

/// Whether an entry is a starred review or a tip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewKind {
    Detailed,
    Tip,
}

/// Body of a review row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewContent {
    Detailed { text: String, stars: StarRating },
    Tip { text: String },
}

impl ReviewContent {
    pub fn kind(&self) -> ReviewKind {
        match self {
            Self::Detailed { .. } => ReviewKind::Detailed,
            Self::Tip { .. } => ReviewKind::Tip,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Detailed { text, .. } | Self::Tip { text } => text,
        }
    }

    pub fn stars(&self) -> Option<StarRating> {
        match self {
            Self::Detailed { stars, .. } => Some(*stars),
            Self::Tip { .. } => None,
        }
    }
}

/// Vote counters on a review. Never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteCounts {
    pub useful: i32,
    pub funny: i32,
    pub cool: i32,
    pub likes: i32,
}

impl VoteCounts {
    pub fn get(&self, kind: UpvoteType) -> i32 {
        match kind {
            UpvoteType::Useful => self.useful,
            UpvoteType::Funny => self.funny,
            UpvoteType::Cool => self.cool,
            UpvoteType::Likes => self.likes,
        }
    }
}

/// Review entity with its author's display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub business_id: BusinessId,
    pub author_id: UserId,
    pub author_name: String,
    pub content: ReviewContent,
    pub review_date: NaiveDate,
    pub votes: VoteCounts,
}

impl Review {
    #[inline]
    pub fn kind(&self) -> ReviewKind {
        self.content.kind()
    }

    /// Check if the given user wrote this review
    #[inline]
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }
}

/// Data for inserting a review; counters start at zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub business_id: BusinessId,
    pub author_id: UserId,
    pub content: ReviewContent,
    pub review_date: NaiveDate,
}

impl NewReview {
    pub fn new(business_id: BusinessId, author_id: UserId, content: ReviewContent) -> Self {
        Self {
            business_id,
            author_id,
            content,
            review_date: Utc::now().date_naive(),
        }
    }
}

/// A review shown on its author's profile, with the business it is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoredReview {
    pub review: Review,
    pub business_name: String,
}

/// Which votes the current viewer already cast on one review
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerVotes {
    pub useful: bool,
    pub funny: bool,
    pub cool: bool,
    pub like: bool,
}

impl ViewerVotes {
    pub fn record(&mut self, kind: UpvoteType) {
        match kind {
            UpvoteType::Useful => self.useful = true,
            UpvoteType::Funny => self.funny = true,
            UpvoteType::Cool => self.cool = true,
            UpvoteType::Likes => self.like = true,
        }
    }

    pub fn contains(&self, kind: UpvoteType) -> bool {
        match kind {
            UpvoteType::Useful => self.useful,
            UpvoteType::Funny => self.funny,
            UpvoteType::Cool => self.cool,
            UpvoteType::Likes => self.like,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind() {
        let detailed = ReviewContent::Detailed {
            text: "x".repeat(30),
            stars: StarRating::from_f64(4.5).unwrap(),
        };
        assert_eq!(detailed.kind(), ReviewKind::Detailed);
        assert_eq!(detailed.stars().map(StarRating::value), Some(4.5));

        let tip = ReviewContent::Tip {
            text: "Try the salsa".to_string(),
        };
        assert_eq!(tip.kind(), ReviewKind::Tip);
        assert_eq!(tip.text(), "Try the salsa");
        assert!(tip.stars().is_none());
    }

    #[test]
    fn test_vote_counts_get() {
        let counts = VoteCounts {
            useful: 1,
            funny: 2,
            cool: 3,
            likes: 4,
        };
        assert_eq!(counts.get(UpvoteType::Funny), 2);
        assert_eq!(counts.get(UpvoteType::Likes), 4);
    }

    #[test]
    fn test_viewer_votes() {
        let mut votes = ViewerVotes::default();
        assert!(!votes.contains(UpvoteType::Cool));
        votes.record(UpvoteType::Cool);
        votes.record(UpvoteType::Likes);
        assert!(votes.contains(UpvoteType::Cool));
        assert!(votes.like);
        assert!(!votes.useful);
    }
}
