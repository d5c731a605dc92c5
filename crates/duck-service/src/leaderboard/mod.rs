//! Leaderboard maintenance
//!
//! [`RankReconciler`] recomputes ranks from the reaction counters and
//! [`LeaderboardScheduler`] runs it periodically in the background.

mod reconciler;
mod scheduler;

pub use reconciler::RankReconciler;
pub use scheduler::{LeaderboardScheduler, RunOutcome, SchedulerConfig, SchedulerState};
