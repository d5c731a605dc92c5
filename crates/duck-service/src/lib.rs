//! # duck-service
//!
//! Application layer containing business logic, services, DTOs and the
//! leaderboard background job.

pub mod dto;
pub mod leaderboard;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use dto::{CreateDuckRequest, DuckResponse, ReactionResponse, UpdateNameRequest, UserResponse};
pub use leaderboard::{
    LeaderboardScheduler, RankReconciler, RunOutcome, SchedulerConfig, SchedulerState,
};
pub use services::{
    DuckService, ReactionService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, UserService,
};
