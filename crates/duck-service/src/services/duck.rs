//! Duck service
//!
//! Handles the duck catalogue: creation (with live notification), listings,
//! the leaderboard view and removal.

use duck_core::entities::NewDuck;
use duck_core::events::LiveEvent;
use duck_core::{DuckId, UserId};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::dto::{CreateDuckRequest, DuckResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Number of ducks shown on the leaderboard
pub const LEADERBOARD_SIZE: i64 = 100;

/// Duck service
pub struct DuckService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DuckService<'a> {
    /// Create a new DuckService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a duck and announce it to live observers.
    ///
    /// The event is published only after the insert has committed. Delivery
    /// problems are logged by the publisher and never fail the request.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_duck(
        &self,
        owner_id: UserId,
        request: CreateDuckRequest,
    ) -> ServiceResult<DuckResponse> {
        request.validate()?;

        let new_duck = NewDuck::new(
            owner_id,
            &request.name,
            request.x,
            request.y,
            request.appearance,
            request.image,
        )?;

        let duck = self.ctx.duck_repo().create(&new_duck).await?;

        let response = match self.ctx.duck_repo().find_with_owner(duck.id).await? {
            Some(with_owner) => DuckResponse::from(with_owner),
            None => DuckResponse::from(duck),
        };

        info!(duck_id = %response.id, owner_id = %owner_id, "Duck created");

        match LiveEvent::new_duck_created(&response) {
            Ok(event) => {
                let delivered = self.ctx.publisher().publish(&event);
                debug!(duck_id = %response.id, delivered, "New duck announced");
            }
            Err(e) => warn!(error = %e, "Failed to build new duck event"),
        }

        Ok(response)
    }

    /// All ducks, newest first
    #[instrument(skip(self))]
    pub async fn list_ducks(&self) -> ServiceResult<Vec<DuckResponse>> {
        let ducks = self.ctx.duck_repo().list().await?;
        Ok(ducks.into_iter().map(DuckResponse::from).collect())
    }

    /// Ducks of one owner, newest first
    #[instrument(skip(self))]
    pub async fn list_user_ducks(&self, user_id: UserId) -> ServiceResult<Vec<DuckResponse>> {
        let ducks = self.ctx.duck_repo().list_by_owner(user_id).await?;
        Ok(ducks.into_iter().map(DuckResponse::from).collect())
    }

    /// Top ranked ducks as of the last reconciliation
    #[instrument(skip(self))]
    pub async fn leaderboard(&self) -> ServiceResult<Vec<DuckResponse>> {
        let ducks = self.ctx.duck_repo().leaderboard(LEADERBOARD_SIZE).await?;
        Ok(ducks.into_iter().map(DuckResponse::from).collect())
    }

    /// Soft delete a duck owned by `owner_id`
    #[instrument(skip(self))]
    pub async fn remove_duck(&self, owner_id: UserId, duck_id: DuckId) -> ServiceResult<()> {
        self.ctx.duck_repo().soft_delete(duck_id, owner_id).await?;

        info!(duck_id = %duck_id, owner_id = %owner_id, "Duck removed");

        Ok(())
    }
}
