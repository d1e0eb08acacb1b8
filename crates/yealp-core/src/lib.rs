//! # yealp-core
//!
//! Domain layer containing entities, value objects and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AuthoredReview, Business, Collection, CollectionMembership, CollectionSummary, Followee,
    NewReview, Photo, Review, ReviewContent, ReviewKind, Session, User, ViewerVotes, VoteCounts,
};
pub use error::DomainError;
pub use traits::{
    BusinessRepository, CollectionRepository, FavoriteRepository, FollowRepository,
    PhotoRepository, RepoResult, ReviewRepository, SessionRepository, UpvoteRepository,
    UserRepository,
};
pub use value_objects::{
    BusinessFilter, BusinessId, CollectionId, EdgeAction, IdParseError, OrderRule, PhotoId,
    ReviewId, StarRating, StarRatingError, ToggleOutcome, UpvoteType, UserId, LISTING_LIMIT,
};
