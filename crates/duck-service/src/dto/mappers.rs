//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use duck_core::entities::{Duck, DuckWithOwner, ReactionOutcome, User};

use super::responses::{DuckResponse, OwnerResponse, ReactionResponse, UserResponse};

impl From<&User> for OwnerResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&Duck> for DuckResponse {
    fn from(duck: &Duck) -> Self {
        Self {
            id: duck.id,
            owner_id: duck.owner_id,
            owner: None,
            name: duck.name.clone(),
            x: duck.x,
            y: duck.y,
            appearance: duck.appearance.clone(),
            image: duck.image.clone(),
            likes_count: duck.likes_count,
            dislikes_count: duck.dislikes_count,
            rank: duck.rank,
            created_at: duck.created_at,
            updated_at: duck.updated_at,
        }
    }
}

impl From<Duck> for DuckResponse {
    fn from(duck: Duck) -> Self {
        Self::from(&duck)
    }
}

impl From<DuckWithOwner> for DuckResponse {
    fn from(value: DuckWithOwner) -> Self {
        Self {
            owner: Some(OwnerResponse::from(&value.owner)),
            ..Self::from(&value.duck)
        }
    }
}

impl From<ReactionOutcome> for ReactionResponse {
    fn from(outcome: ReactionOutcome) -> Self {
        Self {
            duck_id: outcome.reaction.duck_id,
            user_id: outcome.reaction.user_id,
            reaction: outcome.reaction.kind,
            created_at: outcome.reaction.created_at,
            duck: DuckResponse::from(outcome.duck),
        }
    }
}
