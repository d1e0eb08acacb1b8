//! Review model ↔ entity mappers

use yealp_core::entities::{AuthoredReview, NewReview, Review, ReviewContent, VoteCounts};
use yealp_core::value_objects::{BusinessId, ReviewId, StarRating, UserId};

use crate::models::{AuthoredReviewModel, ReviewModel};

/// A row with a detailed review is a review, otherwise it is a tip.
/// Stored stars are snapped onto the half-star grid.
impl From<ReviewModel> for Review {
    fn from(model: ReviewModel) -> Self {
        let content = match (model.detailed_review, model.short_tip) {
            (Some(text), _) => ReviewContent::Detailed {
                text,
                stars: StarRating::nearest(model.stars.unwrap_or_default()),
            },
            (None, tip) => ReviewContent::Tip {
                text: tip.unwrap_or_default(),
            },
        };

        Review {
            id: ReviewId::new(model.review_id),
            business_id: BusinessId::new(model.business_id),
            author_id: UserId::new(model.user_id),
            author_name: model.user_name,
            content,
            review_date: model.review_date,
            votes: VoteCounts {
                useful: model.useful,
                funny: model.funny,
                cool: model.cool,
                likes: model.likes,
            },
        }
    }
}

impl From<AuthoredReviewModel> for AuthoredReview {
    fn from(model: AuthoredReviewModel) -> Self {
        AuthoredReview {
            review: model.review.into(),
            business_name: model.business_name,
        }
    }
}

/// Column values for inserting a review row
pub struct ReviewInsert<'a> {
    pub business_id: &'a str,
    pub detailed_review: Option<&'a str>,
    pub short_tip: Option<&'a str>,
    pub stars: Option<f64>,
}

impl<'a> ReviewInsert<'a> {
    pub fn new(review: &'a NewReview) -> Self {
        let (detailed_review, short_tip, stars) = match &review.content {
            ReviewContent::Detailed { text, stars } => (Some(text.as_str()), None, Some(stars.value())),
            ReviewContent::Tip { text } => (None, Some(text.as_str()), None),
        };
        Self {
            business_id: review.business_id.as_str(),
            detailed_review,
            short_tip,
            stars,
        }
    }
}
