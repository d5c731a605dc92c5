//! Leaderboard ranking rules
//!
//! Ranks are dense and 1-based over all live ducks, ordered by
//! `likes_count DESC, dislikes_count ASC, id ASC`. The id tie-break makes the
//! order total, so the same counters always produce the same ranks.

use std::cmp::Ordering;

use crate::value_objects::DuckId;

/// Counters and current rank of one duck, as read by the reconciler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuckStanding {
    pub id: DuckId,
    pub likes_count: u64,
    pub dislikes_count: u64,
    pub rank: u32,
}

impl DuckStanding {
    pub fn new(id: DuckId, likes_count: u64, dislikes_count: u64, rank: u32) -> Self {
        Self {
            id,
            likes_count,
            dislikes_count,
            rank,
        }
    }
}

/// A rank write the reconciler has to persist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankUpdate {
    pub id: DuckId,
    pub rank: u32,
}

/// Leaderboard order: more likes first, then fewer dislikes, then older id
pub fn standing_order(a: &DuckStanding, b: &DuckStanding) -> Ordering {
    b.likes_count
        .cmp(&a.likes_count)
        .then_with(|| a.dislikes_count.cmp(&b.dislikes_count))
        .then_with(|| a.id.cmp(&b.id))
}

/// Compute the rank writes needed to bring `standings` in line with the
/// leaderboard order. Ducks whose stored rank already matches are skipped.
///
/// The input does not need to be pre-sorted.
pub fn plan_rank_updates(standings: &[DuckStanding]) -> Vec<RankUpdate> {
    let mut ordered: Vec<&DuckStanding> = standings.iter().collect();
    ordered.sort_by(|a, b| standing_order(a, b));

    ordered
        .into_iter()
        .enumerate()
        .filter_map(|(position, standing)| {
            let expected = u32::try_from(position + 1).unwrap_or(u32::MAX);
            (standing.rank != expected).then_some(RankUpdate {
                id: standing.id,
                rank: expected,
            })
        })
        .collect()
}
