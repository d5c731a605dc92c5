//! PostgreSQL implementation of LeaderboardRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use duck_core::leaderboard::{DuckStanding, RankUpdate};
use duck_core::traits::{LeaderboardRepository, RepoResult};

use crate::models::DuckStandingModel;

use super::error::map_db_error;

/// PostgreSQL implementation of LeaderboardRepository
#[derive(Clone)]
pub struct PgLeaderboardRepository {
    pool: PgPool,
}

impl PgLeaderboardRepository {
    /// Create a new PgLeaderboardRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaderboardRepository for PgLeaderboardRepository {
    #[instrument(skip(self))]
    async fn load_standings(&self) -> RepoResult<Vec<DuckStanding>> {
        let rows = sqlx::query_as::<_, DuckStandingModel>(
            r#"
            SELECT id, likes_count, dislikes_count, rank
            FROM ducks
            WHERE deleted_at IS NULL
            ORDER BY likes_count DESC, dislikes_count ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(DuckStanding::from).collect())
    }

    #[instrument(skip(self, updates), fields(planned = updates.len()))]
    async fn apply_ranks(&self, updates: &[RankUpdate]) -> RepoResult<u64> {
        if updates.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let mut changed = 0u64;

        for update in updates {
            // A duck deleted since the read is skipped, not resurrected.
            let result = sqlx::query(
                r#"
                UPDATE ducks
                SET rank = $2, updated_at = NOW()
                WHERE id = $1 AND deleted_at IS NULL AND rank <> $2
                "#,
            )
            .bind(update.id.into_inner())
            .bind(i32::try_from(update.rank).unwrap_or(i32::MAX))
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            changed += result.rows_affected();
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(changed)
    }
}
