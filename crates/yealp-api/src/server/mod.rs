//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;
use yealp_common::{AppConfig, AppError, JwtService};
use yealp_db::{
    create_pool, run_migrations, PgBusinessRepository, PgCollectionRepository,
    PgFavoriteRepository, PgFollowRepository, PgPhotoRepository, PgReviewRepository,
    PgSessionRepository, PgUpvoteRepository, PgUserRepository, PoolSettings,
};
use yealp_service::{LogMailer, ServiceContextBuilder, ServiceSettings, UploadStore};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware.
///
/// Uploaded files are served below `/static`; health probes skip the
/// middleware stack.
pub fn create_app(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.config().storage.upload_dir);
    let router = create_router().nest_service("/static", uploads);
    let router = apply_middleware(router, state.config());
    router.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolSettings::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let uploads = UploadStore::from_config(&config.storage);
    uploads.ensure_dirs().await.map_err(|e| {
        AppError::Config(format!(
            "Cannot create upload directory {}: {e}",
            config.storage.upload_dir
        ))
    })?;

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.reset_token_expiry,
    ));

    info!(
        mail_server = %config.mail.server,
        mail_port = config.mail.port,
        mail_tls = config.mail.use_tls,
        mail_auth = config.mail.username.is_some() && config.mail.password.is_some(),
        "Outgoing mail is written to the log"
    );

    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .business_repo(Arc::new(PgBusinessRepository::new(pool.clone())))
        .review_repo(Arc::new(PgReviewRepository::new(pool.clone())))
        .upvote_repo(Arc::new(PgUpvoteRepository::new(pool.clone())))
        .favorite_repo(Arc::new(PgFavoriteRepository::new(pool.clone())))
        .follow_repo(Arc::new(PgFollowRepository::new(pool.clone())))
        .collection_repo(Arc::new(PgCollectionRepository::new(pool.clone())))
        .photo_repo(Arc::new(PgPhotoRepository::new(pool.clone())))
        .session_repo(Arc::new(PgSessionRepository::new(pool.clone())))
        .jwt_service(jwt_service)
        .mailer(Arc::new(LogMailer::new()))
        .uploads(uploads)
        .settings(ServiceSettings::from_config(&config))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, pool, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    run_server(create_app(state), &addr).await
}
