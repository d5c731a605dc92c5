//! Ports implemented by the infrastructure crates

mod publisher;
mod repositories;

pub use publisher::EventPublisher;
pub use repositories::{
    DuckRepository, LeaderboardRepository, ReactionStore, RepoResult, UserRepository,
};
