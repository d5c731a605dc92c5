//! In-memory doubles for service and scheduler tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use duck_common::auth::JwtService;
use duck_core::entities::{
    Duck, DuckAppearance, DuckWithOwner, NewDuck, Reaction, ReactionKind, ReactionOutcome,
    ReactionTransition, Skin, User,
};
use duck_core::events::LiveEvent;
use duck_core::leaderboard::{DuckStanding, RankUpdate};
use duck_core::traits::{
    DuckRepository, EventPublisher, LeaderboardRepository, ReactionStore, RepoResult,
    UserRepository,
};
use duck_core::{DomainError, DuckId, UserId};
use parking_lot::Mutex;

use crate::services::ServiceContext;

pub(crate) const TEST_SECRET: &str = "test-secret";

#[derive(Default)]
struct State {
    next_id: i64,
    users: HashMap<UserId, User>,
    ducks: Vec<Duck>,
    reactions: HashMap<(DuckId, UserId), Reaction>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn live_duck_mut(&mut self, id: DuckId) -> Option<&mut Duck> {
        self.ducks.iter_mut().find(|d| d.id == id && !d.is_deleted())
    }

    fn with_owner(&self, duck: &Duck) -> DuckWithOwner {
        let owner = self
            .users
            .get(&duck.owner_id)
            .cloned()
            .unwrap_or_else(|| User::new(duck.owner_id));
        DuckWithOwner {
            duck: duck.clone(),
            owner,
        }
    }

    fn live_newest_first(&self) -> impl Iterator<Item = &Duck> {
        self.ducks.iter().rev().filter(|d| !d.is_deleted())
    }
}

/// Repository double backed by a single mutex.
///
/// Every toggle runs under the lock, which gives the same per-duck
/// serialization as the row lock in PostgreSQL.
#[derive(Default)]
pub(crate) struct InMemoryStore {
    state: Mutex<State>,
    load_delay: Mutex<Option<Duration>>,
    apply_delay: Mutex<Option<Duration>>,
    fail_loads: Mutex<bool>,
    loads: AtomicU64,
    applies: AtomicU64,
    active_loads: AtomicUsize,
    max_active_loads: AtomicUsize,
}

impl InMemoryStore {
    pub(crate) fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn add_user(&self, display_name: &str) -> UserId {
        let mut state = self.state.lock();
        let id = UserId::new(state.next_id());
        let mut user = User::new(id);
        user.display_name = Some(display_name.to_string());
        state.users.insert(id, user);
        id
    }

    /// Insert a duck with preset counters
    pub(crate) fn add_duck(&self, owner_id: UserId, likes: u64, dislikes: u64) -> DuckId {
        let new_duck = NewDuck::new(
            owner_id,
            "Fixture",
            0.0,
            0.0,
            DuckAppearance::new(Skin::Superman),
            "https://cdn.example.com/fixture.png".to_string(),
        )
        .unwrap();
        let mut state = self.state.lock();
        let id = DuckId::new(state.next_id());
        let mut duck = Duck::new(id, new_duck);
        duck.likes_count = likes;
        duck.dislikes_count = dislikes;
        state.ducks.push(duck);
        id
    }

    pub(crate) fn set_rank(&self, id: DuckId, rank: u32) {
        if let Some(duck) = self.state.lock().live_duck_mut(id) {
            duck.rank = rank;
        }
    }

    pub(crate) fn set_counters(&self, id: DuckId, likes: u64, dislikes: u64) {
        if let Some(duck) = self.state.lock().live_duck_mut(id) {
            duck.likes_count = likes;
            duck.dislikes_count = dislikes;
        }
    }

    pub(crate) fn rank(&self, id: DuckId) -> u32 {
        self.state
            .lock()
            .ducks
            .iter()
            .find(|d| d.id == id)
            .map_or(0, |d| d.rank)
    }

    pub(crate) fn counters(&self, id: DuckId) -> (u64, u64) {
        self.state
            .lock()
            .ducks
            .iter()
            .find(|d| d.id == id)
            .map_or((0, 0), |d| (d.likes_count, d.dislikes_count))
    }

    pub(crate) fn duck_ids(&self) -> Vec<DuckId> {
        self.state.lock().ducks.iter().map(|d| d.id).collect()
    }

    pub(crate) fn reaction_of(&self, duck_id: DuckId, user_id: UserId) -> Option<ReactionKind> {
        self.state
            .lock()
            .reactions
            .get(&(duck_id, user_id))
            .map(|r| r.kind)
    }

    /// Make every `load_standings` call sleep first
    pub(crate) fn set_load_delay(&self, delay: Duration) {
        *self.load_delay.lock() = Some(delay);
    }

    /// Make every `apply_ranks` call sleep after staging its first row
    pub(crate) fn set_apply_delay(&self, delay: Option<Duration>) {
        *self.apply_delay.lock() = delay;
    }

    pub(crate) fn set_fail_loads(&self, fail: bool) {
        *self.fail_loads.lock() = fail;
    }

    pub(crate) fn loads(&self) -> u64 {
        self.loads.load(Ordering::SeqCst)
    }

    pub(crate) fn applies(&self) -> u64 {
        self.applies.load(Ordering::SeqCst)
    }

    pub(crate) fn max_active_loads(&self) -> usize {
        self.max_active_loads.load(Ordering::SeqCst)
    }
}

struct ActiveLoad<'a>(&'a AtomicUsize);

impl Drop for ActiveLoad<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DuckRepository for InMemoryStore {
    async fn find_by_id(&self, id: DuckId) -> RepoResult<Option<Duck>> {
        let state = self.state.lock();
        Ok(state
            .ducks
            .iter()
            .find(|d| d.id == id && !d.is_deleted())
            .cloned())
    }

    async fn find_with_owner(&self, id: DuckId) -> RepoResult<Option<DuckWithOwner>> {
        let state = self.state.lock();
        Ok(state
            .ducks
            .iter()
            .find(|d| d.id == id && !d.is_deleted())
            .map(|d| state.with_owner(d)))
    }

    async fn list(&self) -> RepoResult<Vec<DuckWithOwner>> {
        let state = self.state.lock();
        Ok(state.live_newest_first().map(|d| state.with_owner(d)).collect())
    }

    async fn list_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<DuckWithOwner>> {
        let state = self.state.lock();
        Ok(state
            .live_newest_first()
            .filter(|d| d.owner_id == owner_id)
            .map(|d| state.with_owner(d))
            .collect())
    }

    async fn leaderboard(&self, limit: i64) -> RepoResult<Vec<DuckWithOwner>> {
        let state = self.state.lock();
        let mut ranked: Vec<&Duck> = state.live_newest_first().filter(|d| d.is_ranked()).collect();
        ranked.sort_by_key(|d| d.rank);
        Ok(ranked
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|d| state.with_owner(d))
            .collect())
    }

    async fn create(&self, duck: &NewDuck) -> RepoResult<Duck> {
        let mut state = self.state.lock();
        if !state.users.contains_key(&duck.owner_id) {
            return Err(DomainError::UserNotFound(duck.owner_id));
        }
        let id = DuckId::new(state.next_id());
        let created = Duck::new(id, duck.clone());
        state.ducks.push(created.clone());
        Ok(created)
    }

    async fn soft_delete(&self, id: DuckId, owner_id: UserId) -> RepoResult<()> {
        let mut state = self.state.lock();
        match state.live_duck_mut(id) {
            Some(duck) if duck.is_owned_by(owner_id) => {
                duck.deleted_at = Some(Utc::now());
                Ok(())
            }
            _ => Err(DomainError::DuckNotFound(id)),
        }
    }
}

#[async_trait]
impl ReactionStore for InMemoryStore {
    async fn react(
        &self,
        duck_id: DuckId,
        user_id: UserId,
        kind: ReactionKind,
    ) -> RepoResult<ReactionOutcome> {
        let mut state = self.state.lock();
        if state.live_duck_mut(duck_id).is_none() {
            return Err(DomainError::DuckNotFound(duck_id));
        }
        if !state.users.contains_key(&user_id) {
            return Err(DomainError::UserNotFound(user_id));
        }

        let existing = state.reactions.get(&(duck_id, user_id)).map(|r| r.kind);
        let transition = ReactionTransition::plan(existing, kind)?;

        let reaction = Reaction::new(duck_id, user_id, transition.resulting_kind());
        state.reactions.insert((duck_id, user_id), reaction.clone());

        let duck = state
            .live_duck_mut(duck_id)
            .ok_or(DomainError::DuckNotFound(duck_id))?;
        duck.apply_transition(transition);

        Ok(ReactionOutcome {
            reaction,
            duck: duck.clone(),
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.state.lock().users.get(&id).cloned())
    }

    async fn update_display_name(&self, id: UserId, display_name: &str) -> RepoResult<User> {
        let mut state = self.state.lock();
        let user = state
            .users
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.display_name = Some(display_name.to_string());
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[async_trait]
impl LeaderboardRepository for InMemoryStore {
    async fn load_standings(&self) -> RepoResult<Vec<DuckStanding>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let active = self.active_loads.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active_loads.fetch_max(active, Ordering::SeqCst);
        let _guard = ActiveLoad(&self.active_loads);

        let delay = *self.load_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if *self.fail_loads.lock() {
            return Err(DomainError::DatabaseError("connection refused".to_string()));
        }

        let state = self.state.lock();
        Ok(state
            .ducks
            .iter()
            .filter(|d| !d.is_deleted())
            .map(|d| DuckStanding::new(d.id, d.likes_count, d.dislikes_count, d.rank))
            .collect())
    }

    async fn apply_ranks(&self, updates: &[RankUpdate]) -> RepoResult<u64> {
        if updates.is_empty() {
            return Ok(0);
        }
        self.applies.fetch_add(1, Ordering::SeqCst);

        // Rows are staged like writes in an open transaction and only land
        // on commit; dropping the future discards them.
        let (first, rest) = updates.split_at(1);
        let mut staged: Vec<RankUpdate> = first.to_vec();

        let delay = *self.apply_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        staged.extend_from_slice(rest);

        let mut state = self.state.lock();
        let mut changed = 0;
        for update in staged {
            if let Some(duck) = state.live_duck_mut(update.id) {
                if duck.rank != update.rank {
                    duck.rank = update.rank;
                    changed += 1;
                }
            }
        }
        Ok(changed)
    }
}

/// Publisher double that keeps every event it receives
#[derive(Default)]
pub(crate) struct RecordingPublisher {
    events: Mutex<Vec<LiveEvent>>,
}

impl RecordingPublisher {
    pub(crate) fn events(&self) -> Vec<LiveEvent> {
        self.events.lock().clone()
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: &LiveEvent) -> usize {
        self.events.lock().push(event.clone());
        1
    }
}

/// Context wired to in-memory doubles
pub(crate) fn test_context(
    store: &Arc<InMemoryStore>,
    publisher: &Arc<RecordingPublisher>,
) -> ServiceContext {
    ServiceContext::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        publisher.clone(),
        Arc::new(JwtService::new(TEST_SECRET)),
    )
}
