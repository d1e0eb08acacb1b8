//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use yealp_core::entities::{
    AuthoredReview, Business, CollectionMembership, CollectionSummary, Followee, Photo, Review,
    User, ViewerVotes,
};
use yealp_core::value_objects::{BusinessFilter, StarRating, UserId};

use super::responses::{
    AuthoredReviewResponse, BusinessResponse, CollectionResponse, CurrentUserResponse,
    FilterResponse, FolloweeResponse, MembershipResponse, PhotoResponse, ReviewResponse,
    TipResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            name: user.name.clone(),
            yealping_since: user.yealping_since,
            image_url: user.image_url(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            yealping_since: user.yealping_since,
            image_url: user.image_url(),
        }
    }
}

impl From<&Followee> for FolloweeResponse {
    fn from(followee: &Followee) -> Self {
        Self {
            user: UserResponse::from(&followee.user),
            follow_since: followee.follow_since,
        }
    }
}

// ============================================================================
// Business Mappers
// ============================================================================

impl From<&Business> for BusinessResponse {
    fn from(business: &Business) -> Self {
        Self {
            business_id: business.id.to_string(),
            name: business.name.clone(),
            address: business.address.clone(),
            city: business.city.clone(),
            state: business.state.clone(),
            postal_code: business.postal_code.clone(),
            full_address: business.full_address(),
            is_open: business.is_open,
            is_takeout: business.is_takeout,
            average_stars: business.average_stars,
            n_detailed_review: business.review_count,
        }
    }
}

impl From<&BusinessFilter> for FilterResponse {
    fn from(filter: &BusinessFilter) -> Self {
        Self {
            state: filter.state.clone(),
            is_takeout: filter.takeout_only,
            is_open: filter.open_only,
            order_by: filter.order,
            path: filter.listing_path(),
        }
    }
}

// ============================================================================
// Review Mappers
// ============================================================================

/// Review with what the current viewer has done to it
#[derive(Debug, Clone, Copy)]
pub struct ReviewForViewer<'a> {
    pub review: &'a Review,
    pub votes: ViewerVotes,
    pub viewer: Option<&'a UserId>,
}

impl ReviewForViewer<'_> {
    fn is_author(&self) -> bool {
        self.viewer.is_some_and(|id| self.review.is_authored_by(id))
    }
}

impl From<ReviewForViewer<'_>> for ReviewResponse {
    fn from(item: ReviewForViewer<'_>) -> Self {
        let review = item.review;
        Self {
            review_id: review.id.into_inner(),
            business_id: review.business_id.to_string(),
            user_id: review.author_id.to_string(),
            user_name: review.author_name.clone(),
            review_date: review.review_date,
            content: review.content.text().to_string(),
            stars: review.content.stars().map_or(0.0, StarRating::value),
            useful: review.votes.useful,
            funny: review.votes.funny,
            cool: review.votes.cool,
            is_useful: item.votes.useful,
            is_funny: item.votes.funny,
            is_cool: item.votes.cool,
            is_author: item.is_author(),
        }
    }
}

impl From<ReviewForViewer<'_>> for TipResponse {
    fn from(item: ReviewForViewer<'_>) -> Self {
        let review = item.review;
        Self {
            review_id: review.id.into_inner(),
            business_id: review.business_id.to_string(),
            user_id: review.author_id.to_string(),
            user_name: review.author_name.clone(),
            review_date: review.review_date,
            content: review.content.text().to_string(),
            likes: review.votes.likes,
            is_like: item.votes.like,
            is_author: item.is_author(),
        }
    }
}

impl From<&AuthoredReview> for AuthoredReviewResponse {
    fn from(entry: &AuthoredReview) -> Self {
        let stars = entry.review.content.stars();
        Self {
            review_id: entry.review.id.into_inner(),
            business_id: entry.review.business_id.to_string(),
            business_name: entry.business_name.clone(),
            review_date: entry.review.review_date,
            content: entry.review.content.text().to_string(),
            stars: stars.map(StarRating::value),
            is_tip: stars.is_none(),
        }
    }
}

// ============================================================================
// Photo / Collection Mappers
// ============================================================================

impl From<&Photo> for PhotoResponse {
    fn from(photo: &Photo) -> Self {
        Self {
            photo_id: photo.id.to_string(),
            url: photo.url(),
        }
    }
}

impl From<&CollectionSummary> for CollectionResponse {
    fn from(summary: &CollectionSummary) -> Self {
        Self {
            owner_id: summary.collection.owner_id.to_string(),
            owner_name: summary.owner_name.clone(),
            collection_id: summary.collection.id.into_inner(),
            name: summary.display_name(),
            created_date: summary.collection.created_date,
            n_business: summary.business_count,
            n_fans: summary.fan_count,
        }
    }
}

impl From<&CollectionMembership> for MembershipResponse {
    fn from(membership: &CollectionMembership) -> Self {
        Self {
            collection_id: membership.collection_id.into_inner(),
            contains_business: membership.contains_business,
        }
    }
}

/// Map a slice of entities with a `From<&T>` impl
pub fn map_all<'a, T, R>(items: &'a [T]) -> Vec<R>
where
    R: From<&'a T>,
{
    items.iter().map(R::from).collect()
}
