//! Reaction entity - a user's like or dislike on a duck

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::duck::Duck;
use crate::error::DomainError;
use crate::value_objects::{DuckId, UserId};

/// Kind of reaction. Stored as `like` / `dislike`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(DomainError::InvalidReaction(other.to_string())),
        }
    }
}

/// Reaction entity, unique per (duck, user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub duck_id: DuckId,
    pub user_id: UserId,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(duck_id: DuckId, user_id: UserId, kind: ReactionKind) -> Self {
        Self {
            duck_id,
            user_id,
            kind,
            created_at: Utc::now(),
        }
    }
}

/// Change a toggle makes to the reaction relation and the duck counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionTransition {
    /// No previous reaction: insert one and bump its counter
    Insert(ReactionKind),
    /// Previous reaction of another kind: delete it, then insert the new one
    Swap { from: ReactionKind, to: ReactionKind },
}

impl ReactionTransition {
    /// Decide what a toggle does given the user's current reaction.
    ///
    /// Repeating the current reaction is rejected with `AlreadyReacted`.
    pub fn plan(
        existing: Option<ReactionKind>,
        requested: ReactionKind,
    ) -> Result<Self, DomainError> {
        match existing {
            None => Ok(Self::Insert(requested)),
            Some(current) if current == requested => Err(DomainError::AlreadyReacted),
            Some(current) => Ok(Self::Swap {
                from: current,
                to: requested,
            }),
        }
    }

    /// Kind of the row that exists after the transition
    #[inline]
    pub fn resulting_kind(self) -> ReactionKind {
        match self {
            Self::Insert(kind) | Self::Swap { to: kind, .. } => kind,
        }
    }

    /// Kind of the row removed by the transition, if any
    #[inline]
    pub fn removed_kind(self) -> Option<ReactionKind> {
        match self {
            Self::Insert(_) => None,
            Self::Swap { from, .. } => Some(from),
        }
    }
}

/// Result of a successful toggle: the stored reaction and the updated duck
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionOutcome {
    pub reaction: Reaction,
    pub duck: Duck,
}
