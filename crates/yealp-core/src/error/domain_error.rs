//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{BusinessId, CollectionId, ReviewId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Business not found: {0}")]
    BusinessNotFound(BusinessId),

    #[error("Review not found: {0}")]
    ReviewNotFound(ReviewId),

    #[error("Collection not found: {owner}/{id}")]
    CollectionNotFound { owner: UserId, id: CollectionId },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid upvote type: {0}")]
    InvalidUpvoteType(String),

    #[error("Invalid order rule: {0}")]
    InvalidOrderRule(String),

    #[error("A {vote} vote cannot be cast on this entry")]
    UpvoteNotApplicable { vote: &'static str },

    #[error("You cannot follow yourself")]
    CannotFollowSelf,

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not review author")]
    NotReviewAuthor,

    #[error("Not collection owner")]
    NotCollectionOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Could not allocate a collection number")]
    CollectionNumberConflict,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database unavailable: {0}")]
    DatabaseUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::BusinessNotFound(_) => "UNKNOWN_BUSINESS",
            Self::ReviewNotFound(_) => "UNKNOWN_REVIEW",
            Self::CollectionNotFound { .. } => "UNKNOWN_COLLECTION",

            // Validation
            Self::InvalidUpvoteType(_) => "INVALID_UPVOTE_TYPE",
            Self::InvalidOrderRule(_) => "INVALID_ORDER_RULE",
            Self::UpvoteNotApplicable { .. } => "UPVOTE_NOT_APPLICABLE",
            Self::CannotFollowSelf => "CANNOT_FOLLOW_SELF",
            Self::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",

            // Authorization
            Self::NotReviewAuthor => "NOT_REVIEW_AUTHOR",
            Self::NotCollectionOwner => "NOT_COLLECTION_OWNER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::CollectionNumberConflict => "COLLECTION_NUMBER_CONFLICT",

            // Infrastructure
            Self::DatabaseUnavailable(_) => "DATABASE_UNAVAILABLE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::BusinessNotFound(_)
                | Self::ReviewNotFound(_)
                | Self::CollectionNotFound { .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidUpvoteType(_)
                | Self::InvalidOrderRule(_)
                | Self::UpvoteNotApplicable { .. }
                | Self::CannotFollowSelf
                | Self::UnsupportedFileType(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotReviewAuthor | Self::NotCollectionOwner)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists | Self::CollectionNumberConflict
        )
    }

    /// Check if the database could not be reached
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::DatabaseUnavailable(_))
    }
}
