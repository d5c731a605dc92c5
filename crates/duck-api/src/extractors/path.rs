//! Path parameter extractors
//!
//! Path segments are taken as strings and parsed into typed ids so a bad id
//! gets our error body instead of axum's plain-text rejection.

use duck_core::{DuckId, ReactionKind, UserId};
use serde::Deserialize;

use crate::response::ApiError;

/// Path parameters with duck_id
#[derive(Debug, Deserialize)]
pub struct DuckIdPath {
    pub duck_id: String,
}

impl DuckIdPath {
    /// Parse duck_id as DuckId
    pub fn duck_id(&self) -> Result<DuckId, ApiError> {
        parse_duck_id(&self.duck_id)
    }
}

/// Path parameters with user_id
#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    /// Parse user_id as UserId
    pub fn user_id(&self) -> Result<UserId, ApiError> {
        self.user_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid user_id format"))
    }
}

/// Path parameters for `/duck/:duck_id/reaction/:reaction`
#[derive(Debug, Deserialize)]
pub struct ReactionPath {
    pub duck_id: String,
    pub reaction: String,
}

impl ReactionPath {
    pub fn duck_id(&self) -> Result<DuckId, ApiError> {
        parse_duck_id(&self.duck_id)
    }

    /// Parse the reaction kind (`like` or `dislike`)
    pub fn reaction(&self) -> Result<ReactionKind, ApiError> {
        self.reaction.parse().map_err(ApiError::Domain)
    }
}

fn parse_duck_id(raw: &str) -> Result<DuckId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid duck_id format"))
}
