//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; forms also implement `Validate`.
//! Messages are the ones shown next to the form fields.

use serde::Deserialize;
use validator::Validate;
use yealp_core::value_objects::{CollectionId, EdgeAction, OrderRule};

// ============================================================================
// Auth Requests
// ============================================================================

/// Sign-up form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 20, message = "Field must be between 2 and 20 characters long."))]
    pub username: String,

    #[validate(
        length(min = 1, message = "This field is required."),
        email(message = "Invalid email address.")
    )]
    pub email: String,

    #[validate(length(min = 8, max = 16, message = "Field must be between 8 and 16 characters long."))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Field must be equal to password."))]
    pub confirm_password: String,
}

/// Login form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        length(min = 1, message = "This field is required."),
        email(message = "Invalid email address.")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "This field is required."))]
    pub password: String,

    /// Keep the session for the long "remember me" lifetime
    #[serde(default)]
    pub remember: bool,
}

/// Password reset request form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RequestResetRequest {
    #[validate(
        length(min = 1, message = "This field is required."),
        email(message = "Invalid email address.")
    )]
    pub email: String,
}

/// New password form reached through the emailed link
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 8, max = 16, message = "Field must be between 8 and 16 characters long."))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Field must be equal to password."))]
    pub confirm_password: String,
}

// ============================================================================
// Account Requests
// ============================================================================

/// Account update form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 2, max = 20, message = "Field must be between 2 and 20 characters long."))]
    pub username: String,

    #[validate(
        length(min = 1, message = "This field is required."),
        email(message = "Invalid email address.")
    )]
    pub email: String,
}

// ============================================================================
// Search Requests
// ============================================================================

/// Restaurant search form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1, message = "This field is required."))]
    pub state: String,

    #[serde(default)]
    pub order_rule: OrderRule,

    #[serde(default)]
    pub is_takeout: bool,

    #[serde(default)]
    pub is_open: bool,
}

// ============================================================================
// Review Requests
// ============================================================================

/// Detailed review form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 0.0, max = 5.0, message = "Not a valid choice."))]
    pub star: f64,

    #[validate(length(min = 30, message = "Field must be at least 30 characters long."))]
    pub content: String,
}

/// Short tip form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTipRequest {
    #[validate(length(min = 1, message = "This field is required."))]
    pub content: String,
}

// ============================================================================
// Social Requests
// ============================================================================

/// Buttons on the restaurant page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantActionRequest {
    pub favorite_action: Option<EdgeAction>,
    /// The full set of the viewer's collections that should hold the business
    pub collections_update: Option<Vec<CollectionId>>,
}

/// Follow button on a profile page
#[derive(Debug, Clone, Deserialize)]
pub struct FollowUserRequest {
    pub follow_action: EdgeAction,
}

/// Follow button on a collection page
#[derive(Debug, Clone, Deserialize)]
pub struct FollowCollectionRequest {
    pub follow_button: EdgeAction,
}
