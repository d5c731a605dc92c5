//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in duck-core.

mod duck;
mod error;
mod leaderboard;
mod reaction;
mod user;

pub use duck::PgDuckRepository;
pub use leaderboard::PgLeaderboardRepository;
pub use reaction::PgReactionStore;
pub use user::PgUserRepository;
