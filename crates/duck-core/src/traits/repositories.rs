//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Duck, DuckWithOwner, NewDuck, ReactionKind, ReactionOutcome, User};
use crate::error::DomainError;
use crate::leaderboard::{DuckStanding, RankUpdate};
use crate::value_objects::{DuckId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a live (not soft-deleted) user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Set a user's display name and return the updated user.
    ///
    /// Returns `UserNotFound` when the user is missing or deleted.
    async fn update_display_name(&self, id: UserId, display_name: &str) -> RepoResult<User>;
}

// ============================================================================
// Duck Repository
// ============================================================================

#[async_trait]
pub trait DuckRepository: Send + Sync {
    /// Find a live (not soft-deleted) duck by ID
    async fn find_by_id(&self, id: DuckId) -> RepoResult<Option<Duck>>;

    /// Find a live duck together with its owner
    async fn find_with_owner(&self, id: DuckId) -> RepoResult<Option<DuckWithOwner>>;

    /// All live ducks, newest first
    async fn list(&self) -> RepoResult<Vec<DuckWithOwner>>;

    /// Live ducks of one owner, newest first
    async fn list_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<DuckWithOwner>>;

    /// Ranked ducks (`rank > 0`) in rank order
    async fn leaderboard(&self, limit: i64) -> RepoResult<Vec<DuckWithOwner>>;

    /// Insert a new duck
    async fn create(&self, duck: &NewDuck) -> RepoResult<Duck>;

    /// Soft delete a duck owned by `owner_id`.
    ///
    /// Returns `DuckNotFound` when the duck is missing, already deleted or
    /// owned by someone else.
    async fn soft_delete(&self, id: DuckId, owner_id: UserId) -> RepoResult<()>;
}

// ============================================================================
// Reaction Store
// ============================================================================

#[async_trait]
pub trait ReactionStore: Send + Sync {
    /// Set `user_id`'s reaction on `duck_id` to `kind` atomically.
    ///
    /// Same-duck calls are serialized by a row lock on the duck. Repeating the
    /// current reaction fails with `AlreadyReacted` and changes nothing.
    async fn react(
        &self,
        duck_id: DuckId,
        user_id: UserId,
        kind: ReactionKind,
    ) -> RepoResult<ReactionOutcome>;
}

// ============================================================================
// Leaderboard Repository
// ============================================================================

#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// Counters and stored rank of every live duck, in leaderboard order
    async fn load_standings(&self) -> RepoResult<Vec<DuckStanding>>;

    /// Write all rank updates in one transaction, returning the rows changed.
    ///
    /// Nothing is committed if any write fails or the future is dropped.
    async fn apply_ranks(&self, updates: &[RankUpdate]) -> RepoResult<u64>;
}
