//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Edge operations (`toggle`, `set`) must be
//! atomic: concurrent callers never leave a duplicate edge or a counter that
//! disagrees with the edge table.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{
    AuthoredReview, Business, Collection, CollectionMembership, CollectionSummary, Followee,
    NewReview, Photo, Review, Session, User,
};
use crate::error::DomainError;
use crate::value_objects::{
    BusinessFilter, BusinessId, CollectionId, ReviewId, ToggleOutcome, UpvoteType, UserId,
};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: &UserId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user. Fails with `EmailAlreadyExists` on a duplicate email.
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Persist name, email and avatar. Fails with `EmailAlreadyExists` when
    /// the email belongs to another account.
    async fn update_profile(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: &UserId) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: &UserId, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Business Repository
// ============================================================================

#[async_trait]
pub trait BusinessRepository: Send + Sync {
    /// Find business (with aggregates) by ID
    async fn find_by_id(&self, id: &BusinessId) -> RepoResult<Option<Business>>;

    /// First `limit` businesses in storage order
    async fn list(&self, limit: i64) -> RepoResult<Vec<Business>>;

    /// Every business matching `filter`, sorted. Unrated businesses sort last.
    async fn search(&self, filter: &BusinessFilter) -> RepoResult<Vec<Business>>;

    /// `limit` businesses picked at random
    async fn random(&self, limit: i64) -> RepoResult<Vec<Business>>;

    /// Distinct states that have at least one business
    async fn states(&self) -> RepoResult<Vec<String>>;
}

// ============================================================================
// Review Repository
// ============================================================================

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Find review (detailed or tip) by ID
    async fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<Review>>;

    /// Detailed reviews of a business, newest first
    async fn find_detailed_by_business(&self, business_id: &BusinessId)
        -> RepoResult<Vec<Review>>;

    /// Tips on a business, newest first
    async fn find_tips_by_business(&self, business_id: &BusinessId) -> RepoResult<Vec<Review>>;

    /// Every entry written by a user, with the business name
    async fn find_by_author(&self, author_id: &UserId) -> RepoResult<Vec<AuthoredReview>>;

    /// Insert the review and its authorship edge in one transaction
    async fn create(&self, review: &NewReview) -> RepoResult<Review>;

    /// Delete a review and its edges. Returns false when nothing was deleted.
    async fn delete(&self, id: ReviewId) -> RepoResult<bool>;
}

// ============================================================================
// Upvote Repository
// ============================================================================

#[async_trait]
pub trait UpvoteRepository: Send + Sync {
    /// Flip the user's vote of `kind` on a review and move the matching
    /// counter by one in the same transaction.
    async fn toggle(
        &self,
        user_id: &UserId,
        review_id: ReviewId,
        kind: UpvoteType,
    ) -> RepoResult<ToggleOutcome>;

    /// Votes the user cast on reviews of one business
    async fn find_by_user_for_business(
        &self,
        user_id: &UserId,
        business_id: &BusinessId,
    ) -> RepoResult<Vec<(ReviewId, UpvoteType)>>;
}

// ============================================================================
// Favorite Repository
// ============================================================================

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn is_favorite(&self, user_id: &UserId, business_id: &BusinessId) -> RepoResult<bool>;

    /// Flip the favorite edge
    async fn toggle(&self, user_id: &UserId, business_id: &BusinessId)
        -> RepoResult<ToggleOutcome>;

    /// Force the favorite edge into `active`. Returns whether anything changed.
    async fn set(&self, user_id: &UserId, business_id: &BusinessId, active: bool)
        -> RepoResult<bool>;

    /// Favorite businesses ordered by name
    async fn find_by_user(&self, user_id: &UserId) -> RepoResult<Vec<Business>>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn is_following_user(&self, fan_id: &UserId, followee_id: &UserId) -> RepoResult<bool>;

    async fn toggle_user(&self, fan_id: &UserId, followee_id: &UserId)
        -> RepoResult<ToggleOutcome>;

    async fn set_user(&self, fan_id: &UserId, followee_id: &UserId, active: bool)
        -> RepoResult<bool>;

    /// Number of users following `user_id`
    async fn fan_count(&self, user_id: &UserId) -> RepoResult<i64>;

    /// Users followed by `fan_id`, most recent first
    async fn find_followees(&self, fan_id: &UserId) -> RepoResult<Vec<Followee>>;

    async fn is_following_collection(
        &self,
        fan_id: &UserId,
        owner_id: &UserId,
        collection_id: CollectionId,
    ) -> RepoResult<bool>;

    async fn toggle_collection(
        &self,
        fan_id: &UserId,
        owner_id: &UserId,
        collection_id: CollectionId,
    ) -> RepoResult<ToggleOutcome>;

    async fn set_collection(
        &self,
        fan_id: &UserId,
        owner_id: &UserId,
        collection_id: CollectionId,
        active: bool,
    ) -> RepoResult<bool>;

    /// Collections followed by `fan_id`, largest first
    async fn find_followed_collections(&self, fan_id: &UserId)
        -> RepoResult<Vec<CollectionSummary>>;
}

// ============================================================================
// Collection Repository
// ============================================================================

#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Create a collection numbered from the owner's atomic counter
    async fn create(&self, owner_id: &UserId) -> RepoResult<Collection>;

    /// Find one collection with its aggregates
    async fn find(
        &self,
        owner_id: &UserId,
        collection_id: CollectionId,
    ) -> RepoResult<Option<CollectionSummary>>;

    /// All collections of an owner, lowest number first
    async fn find_by_owner(&self, owner_id: &UserId) -> RepoResult<Vec<CollectionSummary>>;

    /// Businesses contained in a collection
    async fn find_businesses(
        &self,
        owner_id: &UserId,
        collection_id: CollectionId,
    ) -> RepoResult<Vec<Business>>;

    /// For every collection of the owner, whether it contains the business
    async fn memberships(
        &self,
        owner_id: &UserId,
        business_id: &BusinessId,
    ) -> RepoResult<Vec<CollectionMembership>>;

    /// Make exactly `collection_ids` (among the owner's collections) contain
    /// the business, in one transaction. Ids the owner does not have are ignored.
    async fn replace_memberships(
        &self,
        owner_id: &UserId,
        business_id: &BusinessId,
        collection_ids: &[CollectionId],
    ) -> RepoResult<()>;
}

// ============================================================================
// Photo Repository
// ============================================================================

#[async_trait]
pub trait PhotoRepository: Send + Sync {
    async fn create(&self, photo: &Photo) -> RepoResult<()>;

    /// Photos of a business, newest first
    async fn find_by_business(&self, business_id: &BusinessId) -> RepoResult<Vec<Photo>>;
}

// ============================================================================
// Session Repository
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> RepoResult<()>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Session>>;

    /// Revoke one session. Returns false if it was unknown or already revoked.
    async fn revoke(&self, id: Uuid) -> RepoResult<bool>;

    /// Revoke every active session of a user, returning how many were revoked
    async fn revoke_all_for_user(&self, user_id: &UserId) -> RepoResult<u64>;
}
