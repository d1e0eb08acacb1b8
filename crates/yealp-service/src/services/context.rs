//! Service context - dependency container for services
//!
//! Holds all repositories, the token service, the mailer and the upload
//! store needed by services.

use std::sync::Arc;

use yealp_common::auth::JwtService;
use yealp_common::AppConfig;
use yealp_core::traits::{
    BusinessRepository, CollectionRepository, FavoriteRepository, FollowRepository,
    PhotoRepository, ReviewRepository, SessionRepository, UpvoteRepository, UserRepository,
};

use super::error::{ServiceError, ServiceResult};
use super::mailer::Mailer;
use super::storage::UploadStore;

/// Settings the services read at request time
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Session lifetime in seconds for a normal login
    pub session_lifetime_secs: i64,
    /// Session lifetime in seconds when "remember me" is checked
    pub remember_lifetime_secs: i64,
    /// Sender address of outgoing mail
    pub mail_sender: String,
    /// Base URL for links in outgoing mail
    pub public_base_url: String,
}

impl ServiceSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            session_lifetime_secs: config.jwt.access_token_expiry,
            remember_lifetime_secs: config.jwt.remember_token_expiry,
            mail_sender: config.mail.sender.clone(),
            public_base_url: config.mail.public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            session_lifetime_secs: 86_400,
            remember_lifetime_secs: 2_592_000,
            mail_sender: "noreply@demo.com".to_string(),
            public_base_url: "http://127.0.0.1:8080".to_string(),
        }
    }
}

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    business_repo: Arc<dyn BusinessRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    upvote_repo: Arc<dyn UpvoteRepository>,
    favorite_repo: Arc<dyn FavoriteRepository>,
    follow_repo: Arc<dyn FollowRepository>,
    collection_repo: Arc<dyn CollectionRepository>,
    photo_repo: Arc<dyn PhotoRepository>,
    session_repo: Arc<dyn SessionRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    mailer: Arc<dyn Mailer>,
    uploads: UploadStore,
    settings: ServiceSettings,
}

impl ServiceContext {
    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn business_repo(&self) -> &dyn BusinessRepository {
        self.business_repo.as_ref()
    }

    pub fn review_repo(&self) -> &dyn ReviewRepository {
        self.review_repo.as_ref()
    }

    pub fn upvote_repo(&self) -> &dyn UpvoteRepository {
        self.upvote_repo.as_ref()
    }

    pub fn favorite_repo(&self) -> &dyn FavoriteRepository {
        self.favorite_repo.as_ref()
    }

    pub fn follow_repo(&self) -> &dyn FollowRepository {
        self.follow_repo.as_ref()
    }

    pub fn collection_repo(&self) -> &dyn CollectionRepository {
        self.collection_repo.as_ref()
    }

    pub fn photo_repo(&self) -> &dyn PhotoRepository {
        self.photo_repo.as_ref()
    }

    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn mailer(&self) -> &dyn Mailer {
        self.mailer.as_ref()
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("uploads", &self.uploads)
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    business_repo: Option<Arc<dyn BusinessRepository>>,
    review_repo: Option<Arc<dyn ReviewRepository>>,
    upvote_repo: Option<Arc<dyn UpvoteRepository>>,
    favorite_repo: Option<Arc<dyn FavoriteRepository>>,
    follow_repo: Option<Arc<dyn FollowRepository>>,
    collection_repo: Option<Arc<dyn CollectionRepository>>,
    photo_repo: Option<Arc<dyn PhotoRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    mailer: Option<Arc<dyn Mailer>>,
    uploads: Option<UploadStore>,
    settings: Option<ServiceSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn business_repo(mut self, repo: Arc<dyn BusinessRepository>) -> Self {
        self.business_repo = Some(repo);
        self
    }

    pub fn review_repo(mut self, repo: Arc<dyn ReviewRepository>) -> Self {
        self.review_repo = Some(repo);
        self
    }

    pub fn upvote_repo(mut self, repo: Arc<dyn UpvoteRepository>) -> Self {
        self.upvote_repo = Some(repo);
        self
    }

    pub fn favorite_repo(mut self, repo: Arc<dyn FavoriteRepository>) -> Self {
        self.favorite_repo = Some(repo);
        self
    }

    pub fn follow_repo(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follow_repo = Some(repo);
        self
    }

    pub fn collection_repo(mut self, repo: Arc<dyn CollectionRepository>) -> Self {
        self.collection_repo = Some(repo);
        self
    }

    pub fn photo_repo(mut self, repo: Arc<dyn PhotoRepository>) -> Self {
        self.photo_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn uploads(mut self, uploads: UploadStore) -> Self {
        self.uploads = Some(uploads);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext {
            user_repo: required(self.user_repo, "user_repo")?,
            business_repo: required(self.business_repo, "business_repo")?,
            review_repo: required(self.review_repo, "review_repo")?,
            upvote_repo: required(self.upvote_repo, "upvote_repo")?,
            favorite_repo: required(self.favorite_repo, "favorite_repo")?,
            follow_repo: required(self.follow_repo, "follow_repo")?,
            collection_repo: required(self.collection_repo, "collection_repo")?,
            photo_repo: required(self.photo_repo, "photo_repo")?,
            session_repo: required(self.session_repo, "session_repo")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            mailer: required(self.mailer, "mailer")?,
            uploads: required(self.uploads, "uploads")?,
            settings: self.settings.unwrap_or_default(),
        })
    }
}
