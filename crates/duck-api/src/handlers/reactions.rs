//! Reaction handlers
//!
//! Endpoint for liking or disliking a duck.

use axum::{
    extract::{Path, State},
    Json,
};
use duck_service::dto::ReactionResponse;
use duck_service::ReactionService;

use crate::extractors::{AuthUser, ReactionPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Set the caller's reaction on a duck
///
/// PUT /api/duck/{duck_id}/reaction/{reaction}
pub async fn react(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ReactionPath>,
) -> ApiResult<Json<ReactionResponse>> {
    let duck_id = path.duck_id()?;
    let kind = path.reaction()?;

    let service = ReactionService::new(state.service_context());
    let reaction = service.react(duck_id, auth.user_id, kind).await?;
    Ok(Json(reaction))
}
