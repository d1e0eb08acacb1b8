//! Response DTOs for API endpoints
//!
//! Every page answers with one of these view models. All response DTOs
//! implement `Serialize` for JSON output.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use yealp_core::value_objects::{OrderRule, ToggleOutcome};

// ============================================================================
// Flash Messages
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Danger,
    Info,
    Warning,
    Fail,
}

/// One-shot notice shown above the page content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn new(category: FlashCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Info, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Danger, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Warning, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Fail, message)
    }
}

/// A response that only carries a notice
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub flash: Flash,
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user information
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user_id: String,
    pub name: String,
    pub yealping_since: NaiveDate,
    pub image_url: String,
}

/// The logged-in user's own account, including the email
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub yealping_since: NaiveDate,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FolloweeResponse {
    pub user: UserResponse,
    pub follow_since: NaiveDate,
}

// ============================================================================
// Auth Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub user: CurrentUserResponse,
    pub flash: Flash,
}

/// Successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
    /// Where the client should go next
    pub redirect_to: String,
}

/// Result of checking a reset link
#[derive(Debug, Clone, Serialize)]
pub struct ResetTokenResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

// ============================================================================
// Account Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AccountForm {
    pub username: String,
    pub email: String,
}

/// Account page, with the form prefilled from the stored profile
#[derive(Debug, Clone, Serialize)]
pub struct AccountPage {
    pub user: CurrentUserResponse,
    pub image_url: String,
    pub form: AccountForm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

// ============================================================================
// Business Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BusinessResponse {
    pub business_id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: Option<String>,
    pub full_address: String,
    pub is_open: bool,
    pub is_takeout: bool,
    pub average_stars: Option<f64>,
    pub n_detailed_review: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoiceResponse {
    pub value: String,
    pub label: String,
}

/// Initial values of the search form
#[derive(Debug, Clone, Serialize)]
pub struct SearchDefaults {
    pub state: Option<String>,
    pub order_rule: OrderRule,
    pub is_takeout: bool,
    pub is_open: bool,
}

/// Search page: available choices and defaults
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub states: Vec<String>,
    pub order_rules: Vec<ChoiceResponse>,
    pub defaults: SearchDefaults,
}

/// The filter a listing was produced from
#[derive(Debug, Clone, Serialize)]
pub struct FilterResponse {
    pub state: String,
    pub is_takeout: bool,
    pub is_open: bool,
    pub order_by: OrderRule,
    pub path: String,
}

/// Restaurant listing page
#[derive(Debug, Clone, Serialize)]
pub struct ListingPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterResponse>,
    pub restaurants: Vec<BusinessResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

// ============================================================================
// Review Responses
// ============================================================================

/// A detailed review with the viewer's vote flags
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub review_id: i64,
    pub business_id: String,
    pub user_id: String,
    pub user_name: String,
    pub review_date: NaiveDate,
    pub content: String,
    pub stars: f64,
    pub useful: i32,
    pub funny: i32,
    pub cool: i32,
    pub is_useful: bool,
    pub is_funny: bool,
    pub is_cool: bool,
    pub is_author: bool,
}

/// A short tip with the viewer's like flag
#[derive(Debug, Clone, Serialize)]
pub struct TipResponse {
    pub review_id: i64,
    pub business_id: String,
    pub user_id: String,
    pub user_name: String,
    pub review_date: NaiveDate,
    pub content: String,
    pub likes: i32,
    pub is_like: bool,
    pub is_author: bool,
}

/// Entry on a profile page, either kind, with its business
#[derive(Debug, Clone, Serialize)]
pub struct AuthoredReviewResponse {
    pub review_id: i64,
    pub business_id: String,
    pub business_name: String,
    pub review_date: NaiveDate,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<f64>,
    pub is_tip: bool,
}

/// Created review or tip
#[derive(Debug, Clone, Serialize)]
pub struct CreatedEntryResponse {
    pub review_id: i64,
    pub business_id: String,
    pub flash: Flash,
}

/// Form page for a review or tip
#[derive(Debug, Clone, Serialize)]
pub struct EntryFormPage {
    pub legend: String,
    pub business: BusinessResponse,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub star_choices: Vec<f64>,
}

/// State of an edge after a button press, plus the counter it drives
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToggleResponse {
    pub state: ToggleOutcome,
    pub count: i64,
}

// ============================================================================
// Photo Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PhotoResponse {
    pub photo_id: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhotoFormPage {
    pub business: BusinessResponse,
    pub accepted_extensions: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub flash: Flash,
}

// ============================================================================
// Collection Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CollectionResponse {
    pub owner_id: String,
    pub owner_name: String,
    pub collection_id: i32,
    pub name: String,
    pub created_date: NaiveDate,
    pub n_business: i64,
    pub n_fans: i64,
}

/// One of the viewer's collections on a restaurant page
#[derive(Debug, Clone, Serialize)]
pub struct MembershipResponse {
    pub collection_id: i32,
    pub contains_business: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionsPage {
    pub owner: UserResponse,
    pub is_owner: bool,
    pub collections: Vec<CollectionResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionPage {
    pub collection: CollectionResponse,
    pub restaurants: Vec<BusinessResponse>,
    pub is_fan: bool,
    pub is_owner: bool,
}

// ============================================================================
// Page Responses
// ============================================================================

/// Which tab the restaurant page opens on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowTab {
    #[default]
    Review,
    Tip,
}

/// Restaurant detail page
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantPage {
    pub business: BusinessResponse,
    pub reviews: Vec<ReviewResponse>,
    pub tips: Vec<TipResponse>,
    pub photos: Vec<PhotoResponse>,
    pub favorite: bool,
    pub collections: Vec<MembershipResponse>,
    pub show: ShowTab,
}

/// User profile page
#[derive(Debug, Clone, Serialize)]
pub struct ProfilePage {
    pub user: UserResponse,
    pub reviews: Vec<AuthoredReviewResponse>,
    pub collections: Vec<CollectionResponse>,
    pub is_fan: bool,
    pub is_self: bool,
    pub n_fans: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FolloweesPage {
    pub followees: Vec<FolloweeResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoritesPage {
    pub restaurants: Vec<BusinessResponse>,
    pub collections: Vec<CollectionResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
