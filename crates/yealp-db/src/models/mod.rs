//! Database models - SQLx-compatible structs for PostgreSQL rows

mod business;
mod collection;
mod photo;
mod review;
mod session;
mod user;

pub use business::BusinessModel;
pub use collection::{CollectionModel, CollectionSummaryModel, MembershipModel};
pub use photo::PhotoModel;
pub use review::{AuthoredReviewModel, ReviewModel, UpvoteModel};
pub use session::SessionModel;
pub use user::{FolloweeModel, UserModel};
