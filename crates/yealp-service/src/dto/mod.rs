//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for form submissions
//! - Response DTOs (page view models) for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateReviewRequest, CreateTipRequest, FollowCollectionRequest, FollowUserRequest,
    LoginRequest, RegisterRequest, RequestResetRequest, ResetPasswordRequest,
    RestaurantActionRequest, SearchRequest, UpdateAccountRequest,
};

pub use responses::{
    AccountForm, AccountPage, AuthoredReviewResponse, BusinessResponse, ChoiceResponse,
    CollectionPage, CollectionResponse, CollectionsPage, CreatedEntryResponse,
    CurrentUserResponse, EntryFormPage, FavoritesPage, FilterResponse, Flash, FlashCategory,
    FolloweeResponse, FolloweesPage, HealthChecks, HealthResponse, ListingPage, LoginResponse,
    MembershipResponse, MessageResponse, PhotoFormPage, PhotoResponse, ProfilePage,
    ReadinessResponse, RegisterResponse, ResetTokenResponse, RestaurantPage, ReviewResponse,
    SearchDefaults, SearchPage, ShowTab, TipResponse, ToggleResponse, UploadResponse,
    UserResponse,
};

pub use mappers::{map_all, ReviewForViewer};
