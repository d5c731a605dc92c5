//! Business logic services
//!
//! This module contains the service layer implementations that handle
//! validation and orchestration of domain operations.

pub mod context;
pub mod duck;
pub mod error;
pub mod reaction;
pub mod user;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use duck::{DuckService, LEADERBOARD_SIZE};
pub use error::{ServiceError, ServiceResult};
pub use reaction::ReactionService;
pub use user::UserService;
