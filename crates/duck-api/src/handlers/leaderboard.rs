//! Leaderboard handler

use axum::{extract::State, Json};
use duck_service::dto::DuckResponse;
use duck_service::DuckService;

use crate::response::ApiResult;
use crate::state::AppState;

/// Top ranked ducks as of the last reconciliation
///
/// GET /api/leaderboard
pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<DuckResponse>>> {
    let service = DuckService::new(state.service_context());
    let ducks = service.leaderboard().await?;
    Ok(Json(ducks))
}
