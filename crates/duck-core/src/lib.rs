//! # duck-core
//!
//! Domain layer containing entities, value objects, repository traits, the
//! leaderboard ranking rules and live events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod leaderboard;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Accessory, Duck, DuckAppearance, DuckWithOwner, NewDuck, Reaction, ReactionKind,
    ReactionOutcome, ReactionTransition, Skin, User,
};
pub use error::DomainError;
pub use events::{LiveEvent, LiveEventType};
pub use leaderboard::{DuckStanding, RankUpdate, plan_rank_updates};
pub use traits::{
    DuckRepository, EventPublisher, LeaderboardRepository, ReactionStore, RepoResult,
    UserRepository,
};
pub use value_objects::{DuckId, IdParseError, UserId};
