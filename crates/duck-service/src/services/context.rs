//! Service context - dependency container for services
//!
//! Holds the repositories, the live event publisher and the token verifier.

use std::sync::Arc;

use duck_common::auth::JwtService;
use duck_core::traits::{
    DuckRepository, EventPublisher, LeaderboardRepository, ReactionStore, UserRepository,
};
use duck_db::{
    PgDuckRepository, PgLeaderboardRepository, PgPool, PgReactionStore, PgUserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cloning is cheap: every field is behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    duck_repo: Arc<dyn DuckRepository>,
    reaction_store: Arc<dyn ReactionStore>,
    leaderboard_repo: Arc<dyn LeaderboardRepository>,

    // Live notifications
    publisher: Arc<dyn EventPublisher>,

    // Services
    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        duck_repo: Arc<dyn DuckRepository>,
        reaction_store: Arc<dyn ReactionStore>,
        leaderboard_repo: Arc<dyn LeaderboardRepository>,
        publisher: Arc<dyn EventPublisher>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            user_repo,
            duck_repo,
            reaction_store,
            leaderboard_repo,
            publisher,
            jwt_service,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the duck repository
    pub fn duck_repo(&self) -> &dyn DuckRepository {
        self.duck_repo.as_ref()
    }

    /// Get the reaction store
    pub fn reaction_store(&self) -> &dyn ReactionStore {
        self.reaction_store.as_ref()
    }

    /// Get a shared handle to the leaderboard repository (owned by the scheduler task)
    pub fn leaderboard_repo(&self) -> Arc<dyn LeaderboardRepository> {
        Arc::clone(&self.leaderboard_repo)
    }

    // === Notifications ===

    /// Get the live event publisher
    pub fn publisher(&self) -> &dyn EventPublisher {
        self.publisher.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("jwt_service", &self.jwt_service)
            .finish_non_exhaustive()
    }
}

/// Builder for ServiceContext
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    duck_repo: Option<Arc<dyn DuckRepository>>,
    reaction_store: Option<Arc<dyn ReactionStore>>,
    leaderboard_repo: Option<Arc<dyn LeaderboardRepository>>,
    publisher: Option<Arc<dyn EventPublisher>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            user_repo: None,
            duck_repo: None,
            reaction_store: None,
            leaderboard_repo: None,
            publisher: None,
            jwt_service: None,
        }
    }

    /// Use the PostgreSQL implementations of every repository
    pub fn postgres(self, pool: &PgPool) -> Self {
        self.user_repo(Arc::new(PgUserRepository::new(pool.clone())))
            .duck_repo(Arc::new(PgDuckRepository::new(pool.clone())))
            .reaction_store(Arc::new(PgReactionStore::new(pool.clone())))
            .leaderboard_repo(Arc::new(PgLeaderboardRepository::new(pool.clone())))
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn duck_repo(mut self, repo: Arc<dyn DuckRepository>) -> Self {
        self.duck_repo = Some(repo);
        self
    }

    pub fn reaction_store(mut self, store: Arc<dyn ReactionStore>) -> Self {
        self.reaction_store = Some(store);
        self
    }

    pub fn leaderboard_repo(mut self, repo: Arc<dyn LeaderboardRepository>) -> Self {
        self.leaderboard_repo = Some(repo);
        self
    }

    pub fn publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo.ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.duck_repo.ok_or_else(|| ServiceError::validation("duck_repo is required"))?,
            self.reaction_store.ok_or_else(|| ServiceError::validation("reaction_store is required"))?,
            self.leaderboard_repo.ok_or_else(|| ServiceError::validation("leaderboard_repo is required"))?,
            self.publisher.ok_or_else(|| ServiceError::validation("publisher is required"))?,
            self.jwt_service.ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
