//! Duck entity - the voted-on object carrying reaction counters and a rank

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::reaction::{ReactionKind, ReactionTransition};
use super::user::User;
use crate::error::DomainError;
use crate::value_objects::{DuckId, UserId};

/// Maximum duck name length in characters
pub const MAX_DUCK_NAME_LEN: usize = 64;

// ============================================================================
// Appearance
// ============================================================================

/// Base skin of a duck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skin {
    Giraffe,
    Lgbt,
    Superman,
}

impl Skin {
    pub const ALL: [Skin; 3] = [Skin::Giraffe, Skin::Lgbt, Skin::Superman];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Giraffe => "giraffe",
            Self::Lgbt => "lgbt",
            Self::Superman => "superman",
        }
    }
}

impl FromStr for Skin {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|skin| skin.as_str() == s)
            .ok_or_else(|| DomainError::ValidationError(format!("unknown skin: {s}")))
    }
}

/// Item a duck can wear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessory {
    FlowerCrown,
    KingCrown,
    SupermanCape,
    VespaHelmet,
}

impl Accessory {
    pub const ALL: [Accessory; 4] = [
        Accessory::FlowerCrown,
        Accessory::KingCrown,
        Accessory::SupermanCape,
        Accessory::VespaHelmet,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FlowerCrown => "flower_crown",
            Self::KingCrown => "king_crown",
            Self::SupermanCape => "superman_cape",
            Self::VespaHelmet => "vespa_helmet",
        }
    }
}

impl FromStr for Accessory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|accessory| accessory.as_str() == s)
            .ok_or_else(|| DomainError::ValidationError(format!("unknown accessory: {s}")))
    }
}

impl fmt::Display for Accessory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual payload stored as JSON alongside the duck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuckAppearance {
    pub skin: Skin,
    #[serde(default)]
    pub accessories: Vec<Accessory>,
}

impl DuckAppearance {
    pub fn new(skin: Skin) -> Self {
        Self {
            skin,
            accessories: Vec::new(),
        }
    }
}

// ============================================================================
// Duck
// ============================================================================

/// Duck entity
#[derive(Debug, Clone, PartialEq)]
pub struct Duck {
    pub id: DuckId,
    pub owner_id: UserId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub appearance: DuckAppearance,
    pub image: String,
    pub likes_count: u64,
    pub dislikes_count: u64,
    /// 1-based leaderboard position, 0 until the first reconciliation
    pub rank: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Duck {
    /// Materialize a freshly inserted duck
    pub fn new(id: DuckId, new_duck: NewDuck) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id: new_duck.owner_id,
            name: new_duck.name,
            x: new_duck.x,
            y: new_duck.y,
            appearance: new_duck.appearance,
            image: new_duck.image,
            likes_count: 0,
            dislikes_count: 0,
            rank: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    #[inline]
    pub fn is_ranked(&self) -> bool {
        self.rank > 0
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    fn counter_mut(&mut self, kind: ReactionKind) -> &mut u64 {
        match kind {
            ReactionKind::Like => &mut self.likes_count,
            ReactionKind::Dislike => &mut self.dislikes_count,
        }
    }

    /// Apply a planned reaction change to the cached counters.
    ///
    /// Decrements saturate at zero so the counters can never go negative.
    pub fn apply_transition(&mut self, transition: ReactionTransition) {
        match transition {
            ReactionTransition::Insert(kind) => {
                let counter = self.counter_mut(kind);
                *counter = counter.saturating_add(1);
            }
            ReactionTransition::Swap { from, to } => {
                let old = self.counter_mut(from);
                *old = old.saturating_sub(1);
                let new = self.counter_mut(to);
                *new = new.saturating_add(1);
            }
        }
        self.updated_at = Utc::now();
    }
}

/// A duck joined with its owner, as returned by listing queries
#[derive(Debug, Clone, PartialEq)]
pub struct DuckWithOwner {
    pub duck: Duck,
    pub owner: User,
}

// ============================================================================
// NewDuck
// ============================================================================

/// Validated input for inserting a duck
#[derive(Debug, Clone, PartialEq)]
pub struct NewDuck {
    pub owner_id: UserId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub appearance: DuckAppearance,
    pub image: String,
}

impl NewDuck {
    /// Build a NewDuck, trimming the name and rejecting non-finite coordinates
    pub fn new(
        owner_id: UserId,
        name: &str,
        x: f64,
        y: f64,
        appearance: DuckAppearance,
        image: String,
    ) -> Result<Self, DomainError> {
        let name = name.trim();
        let len = name.chars().count();
        if len == 0 || len > MAX_DUCK_NAME_LEN {
            return Err(DomainError::ValidationError(format!(
                "name must be between 1 and {MAX_DUCK_NAME_LEN} characters"
            )));
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(DomainError::ValidationError(
                "position must be a finite number".to_string(),
            ));
        }
        if image.trim().is_empty() {
            return Err(DomainError::ValidationError("image is required".to_string()));
        }

        Ok(Self {
            owner_id,
            name: name.to_string(),
            x,
            y,
            appearance,
            image,
        })
    }
}
