//! User service
//!
//! Profile lookups and renames for the authenticated caller. Accounts
//! themselves are provisioned elsewhere.

use duck_core::{DomainError, User, UserId};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{UpdateNameRequest, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Profile of a live user
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: UserId) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        Ok(UserResponse::from(user))
    }

    /// Change the caller's display name and return the updated profile
    #[instrument(skip(self, request))]
    pub async fn update_name(
        &self,
        user_id: UserId,
        request: UpdateNameRequest,
    ) -> ServiceResult<UserResponse> {
        request.validate()?;
        let name = User::normalize_display_name(&request.name)?;

        let user = self
            .ctx
            .user_repo()
            .update_display_name(user_id, &name)
            .await?;

        info!(user_id = %user_id, "Display name updated");

        Ok(UserResponse::from(user))
    }
}
