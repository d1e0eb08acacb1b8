//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod account;
pub mod auth;
pub mod business;
pub mod collection;
pub mod context;
pub mod error;
pub mod mailer;
pub mod photo;
pub mod review;
pub mod social;
pub mod storage;

#[cfg(test)]
pub(crate) mod fakes;

// Re-export all services for convenience
pub use account::AccountService;
pub use auth::{safe_redirect, AuthService, Identity};
pub use business::BusinessService;
pub use collection::CollectionService;
pub use context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use error::{ServiceError, ServiceResult};
pub use mailer::{LogMailer, Mailer, OutgoingMail};
pub use photo::{PhotoService, UploadedFile};
pub use review::ReviewService;
pub use social::SocialService;
pub use storage::{UploadKind, UploadStore};
