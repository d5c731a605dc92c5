//! Reaction entity <-> model mapper

use duck_core::entities::{Reaction, ReactionKind};
use duck_core::error::DomainError;
use duck_core::value_objects::{DuckId, UserId};

use crate::models::ReactionModel;

/// Convert ReactionModel to Reaction entity. Fails only if the row violates
/// the `reaction` check constraint.
impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        Ok(Reaction {
            duck_id: DuckId::new(model.duck_id),
            user_id: UserId::new(model.user_id),
            kind: model.reaction.parse::<ReactionKind>()?,
            created_at: model.created_at,
        })
    }
}
