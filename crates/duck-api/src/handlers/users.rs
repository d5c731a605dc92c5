//! User handlers
//!
//! The caller's own profile.

use axum::{extract::State, Json};
use duck_service::dto::{UpdateNameRequest, UserResponse};
use duck_service::UserService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the caller's profile
///
/// GET /api/user
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.get_user(auth.user_id).await?;
    Ok(Json(user))
}

/// Change the caller's display name
///
/// PUT /api/user/name
pub async fn update_name(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateNameRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.update_name(auth.user_id, request).await?;
    Ok(Json(user))
}
