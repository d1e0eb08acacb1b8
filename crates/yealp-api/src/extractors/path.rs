//! Path parameter extractors
//!
//! Type-safe extraction of keys, numeric ids and listing segments from path
//! parameters. Anything malformed is rejected with 400 before reaching a
//! service.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use yealp_core::value_objects::{
    BusinessFilter, BusinessId, CollectionId, OrderRule, ReviewId, UpvoteType, UserId,
};

use crate::response::ApiError;

/// Extract path parameters, turning rejections into [`ApiError::InvalidPath`]
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(ApiPath(inner))
    }
}

fn business_key(raw: &str) -> Result<BusinessId, ApiError> {
    BusinessId::parse(raw).map_err(|e| ApiError::invalid_path(format!("business_id: {e}")))
}

fn user_key(raw: &str) -> Result<UserId, ApiError> {
    UserId::parse(raw).map_err(|e| ApiError::invalid_path(format!("user_id: {e}")))
}

/// Path parameters with business_id
#[derive(Debug, Deserialize)]
pub struct BusinessPath {
    pub business_id: String,
}

impl BusinessPath {
    pub fn business_id(&self) -> Result<BusinessId, ApiError> {
        business_key(&self.business_id)
    }
}

/// Path parameters addressing one review of a business
#[derive(Debug, Deserialize)]
pub struct ReviewPath {
    pub business_id: String,
    pub review_id: String,
}

impl ReviewPath {
    pub fn business_id(&self) -> Result<BusinessId, ApiError> {
        business_key(&self.business_id)
    }

    pub fn review_id(&self) -> Result<ReviewId, ApiError> {
        self.review_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid review_id format"))
    }
}

/// Path parameters of an upvote button
#[derive(Debug, Deserialize)]
pub struct UpvotePath {
    pub business_id: String,
    pub review_id: String,
    pub upvote_type: String,
}

impl UpvotePath {
    pub fn review(&self) -> Result<(BusinessId, ReviewId), ApiError> {
        let path = ReviewPath {
            business_id: self.business_id.clone(),
            review_id: self.review_id.clone(),
        };
        Ok((path.business_id()?, path.review_id()?))
    }

    /// Only the four known vote columns are accepted
    pub fn upvote_type(&self) -> Result<UpvoteType, ApiError> {
        Ok(self.upvote_type.parse::<UpvoteType>()?)
    }
}

/// Path parameters with user_id
#[derive(Debug, Deserialize)]
pub struct UserPath {
    pub user_id: String,
}

impl UserPath {
    pub fn user_id(&self) -> Result<UserId, ApiError> {
        user_key(&self.user_id)
    }
}

/// Path parameters addressing one collection of a user
#[derive(Debug, Deserialize)]
pub struct CollectionPath {
    pub user_id: String,
    pub collection_id: String,
}

impl CollectionPath {
    pub fn user_id(&self) -> Result<UserId, ApiError> {
        user_key(&self.user_id)
    }

    pub fn collection_id(&self) -> Result<CollectionId, ApiError> {
        self.collection_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid collection_id format"))
    }
}

/// Path parameters of the password reset link
#[derive(Debug, Deserialize)]
pub struct ResetTokenPath {
    pub token: String,
}

/// Segments of a filtered listing:
/// `/restaurants/:state/is_takeout:<bool>/is_open:<bool>/order_by:<rule>`
#[derive(Debug, Deserialize)]
pub struct ListingPath {
    pub state: String,
    pub takeout: String,
    pub open: String,
    pub order: String,
}

impl ListingPath {
    pub fn filter(&self) -> Result<BusinessFilter, ApiError> {
        if self.state.is_empty() || !self.state.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ApiError::invalid_path(format!("Invalid state: {}", self.state)));
        }

        let order = segment_value(&self.order, "order_by")?.parse::<OrderRule>()?;

        Ok(BusinessFilter {
            takeout_only: flag_segment(&self.takeout, "is_takeout")?,
            open_only: flag_segment(&self.open, "is_open")?,
            order,
            ..BusinessFilter::new(self.state.clone())
        })
    }
}

/// Value of a `name:value` segment
fn segment_value<'s>(segment: &'s str, name: &str) -> Result<&'s str, ApiError> {
    segment
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix(':'))
        .ok_or_else(|| ApiError::invalid_path(format!("Expected {name}:<value>, got {segment}")))
}

/// Parse `name:True` / `name:False`
fn flag_segment(segment: &str, name: &str) -> Result<bool, ApiError> {
    match segment_value(segment, name)? {
        v if v.eq_ignore_ascii_case("true") => Ok(true),
        v if v.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(ApiError::invalid_path(format!("Invalid {name} flag: {other}"))),
    }
}
