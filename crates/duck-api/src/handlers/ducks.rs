//! Duck handlers
//!
//! Endpoints for creating, listing and removing ducks.

use axum::{
    extract::{Path, State},
    Json,
};
use duck_service::dto::{CreateDuckRequest, DuckResponse, MessageResponse};
use duck_service::DuckService;

use crate::extractors::{AuthUser, DuckIdPath, UserIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a duck owned by the caller
///
/// POST /api/duck
pub async fn create_duck(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateDuckRequest>,
) -> ApiResult<Created<DuckResponse>> {
    let service = DuckService::new(state.service_context());
    let duck = service.create_duck(auth.user_id, request).await?;
    Ok(Created(duck))
}

/// List all ducks, newest first
///
/// GET /api/ducks
pub async fn list_ducks(State(state): State<AppState>) -> ApiResult<Json<Vec<DuckResponse>>> {
    let service = DuckService::new(state.service_context());
    let ducks = service.list_ducks().await?;
    Ok(Json(ducks))
}

/// List the ducks of one user
///
/// GET /api/user/{user_id}/ducks
pub async fn list_user_ducks(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<Vec<DuckResponse>>> {
    let user_id = path.user_id()?;

    let service = DuckService::new(state.service_context());
    let ducks = service.list_user_ducks(user_id).await?;
    Ok(Json(ducks))
}

/// Remove one of the caller's ducks
///
/// DELETE /api/duck/{duck_id}
pub async fn remove_duck(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<DuckIdPath>,
) -> ApiResult<Json<MessageResponse>> {
    let duck_id = path.duck_id()?;

    let service = DuckService::new(state.service_context());
    service.remove_duck(auth.user_id, duck_id).await?;
    Ok(Json(MessageResponse::new("Duck removed")))
}
