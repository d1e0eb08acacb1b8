//! # yealp-db
//!
//! Database layer implementing the `yealp-core` repository traits with
//! PostgreSQL via SQLx.
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use yealp_db::{create_pool, run_migrations, PgUserRepository, PoolSettings};
//!
//! async fn example(config: &yealp_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolSettings::from(config)).await?;
//!     run_migrations(&pool).await?;
//!     let users = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolSettings, MIGRATIONS_DIR};
pub use repositories::{
    PgBusinessRepository, PgCollectionRepository, PgFavoriteRepository, PgFollowRepository,
    PgPhotoRepository, PgReviewRepository, PgSessionRepository, PgUpvoteRepository,
    PgUserRepository,
};
