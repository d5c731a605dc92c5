//! HTTP request handlers
//!
//! Handlers are thin: extract, call a service, wrap the result.

pub mod ducks;
pub mod health;
pub mod leaderboard;
pub mod reactions;
pub mod users;
