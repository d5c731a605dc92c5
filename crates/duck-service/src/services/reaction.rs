//! Reaction service
//!
//! Entry point for like/dislike toggles. Consistency is the store's job; this
//! layer only maps the outcome and logs it.

use duck_core::{DuckId, ReactionKind, UserId};
use tracing::{info, instrument};

use crate::dto::ReactionResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Set the user's reaction on a duck
    #[instrument(skip(self))]
    pub async fn react(
        &self,
        duck_id: DuckId,
        user_id: UserId,
        kind: ReactionKind,
    ) -> ServiceResult<ReactionResponse> {
        let outcome = self.ctx.reaction_store().react(duck_id, user_id, kind).await?;

        info!(
            duck_id = %duck_id,
            user_id = %user_id,
            reaction = %kind,
            likes = outcome.duck.likes_count,
            dislikes = outcome.duck.dislikes_count,
            "Reaction recorded"
        );

        Ok(ReactionResponse::from(outcome))
    }
}
