//! Rank reconciliation
//!
//! Reads every live duck's counters, computes dense ranks and writes only the
//! ranks that changed, all in one transaction.

use std::sync::Arc;

use duck_core::leaderboard::plan_rank_updates;
use duck_core::traits::{LeaderboardRepository, RepoResult};
use tracing::{debug, instrument};

/// Recomputes leaderboard ranks
#[derive(Clone)]
pub struct RankReconciler {
    repo: Arc<dyn LeaderboardRepository>,
}

impl RankReconciler {
    pub fn new(repo: Arc<dyn LeaderboardRepository>) -> Self {
        Self { repo }
    }

    /// Run one reconciliation pass and return the number of ducks re-ranked.
    ///
    /// Nothing is written when the stored ranks already match. Dropping the
    /// future before it resolves rolls the write back.
    #[instrument(skip(self))]
    pub async fn reconcile(&self) -> RepoResult<u64> {
        let standings = self.repo.load_standings().await?;
        if standings.is_empty() {
            debug!("No ducks to rank");
            return Ok(0);
        }

        let updates = plan_rank_updates(&standings);
        if updates.is_empty() {
            debug!(ducks = standings.len(), "Ranks already up to date");
            return Ok(0);
        }

        let changed = self.repo.apply_ranks(&updates).await?;
        debug!(
            ducks = standings.len(),
            planned = updates.len(),
            changed,
            "Ranks written"
        );

        Ok(changed)
    }
}

impl std::fmt::Debug for RankReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankReconciler").finish_non_exhaustive()
    }
}
