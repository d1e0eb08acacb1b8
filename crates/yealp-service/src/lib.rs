//! # yealp-service
//!
//! Application layer containing business logic, services, forms and DTOs.

pub mod dto;
pub mod forms;
pub mod services;

pub use forms::FieldErrors;
pub use services::{
    AccountService, AuthService, BusinessService, CollectionService, Identity, LogMailer,
    Mailer, OutgoingMail, PhotoService, ReviewService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, ServiceSettings, SocialService, UploadKind, UploadStore,
    UploadedFile,
};
