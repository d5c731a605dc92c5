//! PostgreSQL implementation of ReactionStore
//!
//! A toggle runs in one transaction that first locks the duck row with
//! `SELECT ... FOR UPDATE`. Concurrent toggles on the same duck queue on that
//! lock, so the counters always match the reaction rows. Returning early with
//! an error drops the transaction, which rolls it back.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use duck_core::entities::{Duck, Reaction, ReactionKind, ReactionOutcome, ReactionTransition};
use duck_core::error::DomainError;
use duck_core::traits::{ReactionStore, RepoResult};
use duck_core::value_objects::{DuckId, UserId};

use crate::mappers::count_to_db;
use crate::models::{DuckModel, ReactionModel};

use super::error::{duck_not_found, map_db_error, map_missing_user, map_unique_violation};

/// PostgreSQL implementation of ReactionStore
#[derive(Clone)]
pub struct PgReactionStore {
    pool: PgPool,
}

impl PgReactionStore {
    /// Create a new PgReactionStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionStore for PgReactionStore {
    #[instrument(skip(self))]
    async fn react(
        &self,
        duck_id: DuckId,
        user_id: UserId,
        kind: ReactionKind,
    ) -> RepoResult<ReactionOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let locked = sqlx::query_as::<_, DuckModel>(
            r#"
            SELECT id, owner_id, name, x, y, appearance, image,
                   likes_count, dislikes_count, rank,
                   created_at, updated_at, deleted_at
            FROM ducks
            WHERE id = $1 AND deleted_at IS NULL
            FOR UPDATE
            "#,
        )
        .bind(duck_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| duck_not_found(duck_id))?;
        let mut duck = Duck::from(locked);

        let existing = sqlx::query_scalar::<_, String>(
            r#"
            SELECT reaction FROM duck_reactions WHERE duck_id = $1 AND user_id = $2
            "#,
        )
        .bind(duck_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .map(|raw| raw.parse::<ReactionKind>())
        .transpose()?;

        let transition = ReactionTransition::plan(existing, kind)?;

        if transition.removed_kind().is_some() {
            sqlx::query(
                r#"
                DELETE FROM duck_reactions WHERE duck_id = $1 AND user_id = $2
                "#,
            )
            .bind(duck_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        let inserted = sqlx::query_as::<_, ReactionModel>(
            r#"
            INSERT INTO duck_reactions (duck_id, user_id, reaction)
            VALUES ($1, $2, $3)
            RETURNING duck_id, user_id, reaction, created_at
            "#,
        )
        .bind(duck_id.into_inner())
        .bind(user_id.into_inner())
        .bind(transition.resulting_kind().as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            // A concurrent first reaction from the same user wins the primary key.
            if e.as_database_error().is_some_and(|db| db.is_foreign_key_violation()) {
                map_missing_user(e, user_id)
            } else {
                map_unique_violation(e, || DomainError::AlreadyReacted)
            }
        })?;
        let reaction = Reaction::try_from(inserted)?;

        duck.apply_transition(transition);

        let updated = sqlx::query_as::<_, DuckModel>(
            r#"
            UPDATE ducks
            SET likes_count = $2, dislikes_count = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, owner_id, name, x, y, appearance, image,
                      likes_count, dislikes_count, rank,
                      created_at, updated_at, deleted_at
            "#,
        )
        .bind(duck_id.into_inner())
        .bind(count_to_db(duck.likes_count))
        .bind(count_to_db(duck.dislikes_count))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(
            duck_id = %duck_id,
            user_id = %user_id,
            reaction = %kind,
            swapped = transition.removed_kind().is_some(),
            "Reaction stored"
        );

        Ok(ReactionOutcome {
            reaction,
            duck: Duck::from(updated),
        })
    }
}
