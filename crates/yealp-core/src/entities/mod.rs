//! Domain entities - core business objects

mod business;
mod collection;
mod photo;
mod review;
mod session;
mod user;

pub use business::Business;
pub use collection::{Collection, CollectionMembership, CollectionSummary};
pub use photo::Photo;
pub use review::{AuthoredReview, NewReview, Review, ReviewContent, ReviewKind, ViewerVotes, VoteCounts};
pub use session::Session;
pub use user::{Followee, User};
