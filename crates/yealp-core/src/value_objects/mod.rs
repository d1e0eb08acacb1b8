//! Value objects - immutable types that represent domain concepts

mod edge;
mod ids;
mod search;
mod stars;
mod upvote;

pub use edge::{EdgeAction, ToggleOutcome};
pub use ids::{BusinessId, CollectionId, IdParseError, PhotoId, ReviewId, UserId};
pub use search::{BusinessFilter, OrderRule, LISTING_LIMIT};
pub use stars::{StarRating, StarRatingError};
pub use upvote::UpvoteType;
