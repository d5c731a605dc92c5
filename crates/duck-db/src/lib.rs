//! # duck-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `duck-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the row-locked reaction toggle
//!
//! ## Usage
//!
//! ```rust,ignore
//! use duck_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use duck_db::repositories::PgDuckRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let duck_repo = PgDuckRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{
    check_connection, create_lazy_pool, create_pool, create_pool_from_env, run_migrations,
    DatabaseConfig, PgPool,
};
pub use repositories::{
    PgDuckRepository, PgLeaderboardRepository, PgReactionStore, PgUserRepository,
};
