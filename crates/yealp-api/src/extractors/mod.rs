//! Axum extractors for request handling
//!
//! Custom extractors for authentication, JSON bodies, multipart uploads, path
//! segments and query strings.

mod auth;
mod json;
mod path;
mod query;
mod upload;

pub use auth::{AuthUser, OptionalAuthUser};
pub use path::{
    ApiPath, BusinessPath, CollectionPath, ListingPath, ResetTokenPath, ReviewPath, UpvotePath,
    UserPath,
};
pub use json::{JsonBody, OptionalJsonBody};
pub use query::{ApiQuery, NextQuery, ShowQuery};
pub use upload::PictureUpload;
