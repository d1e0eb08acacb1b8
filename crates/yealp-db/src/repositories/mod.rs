//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in yealp-core.
//! Each repository owns a clone of the pool and checks connections out per call.

mod business;
mod collection;
mod edge;
mod error;
mod favorite;
mod follow;
mod photo;
mod review;
mod session;
mod upvote;
mod user;

pub use business::PgBusinessRepository;
pub use collection::PgCollectionRepository;
pub use favorite::PgFavoriteRepository;
pub use follow::PgFollowRepository;
pub use photo::PgPhotoRepository;
pub use review::PgReviewRepository;
pub use session::PgSessionRepository;
pub use upvote::PgUpvoteRepository;
pub use user::PgUserRepository;
