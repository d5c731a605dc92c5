//! Route definitions
//!
//! REST routes are mounted under /api next to the live WebSocket endpoint.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{ducks, health, leaderboard, reactions, users};
use crate::state::AppState;

/// Create the main API router (excluding health for separate middleware handling)
pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new().nest("/api", api_routes(state))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(duck_routes())
        .merge(leaderboard_routes())
        .merge(duck_gateway::create_router().with_state(state.gateway().clone()))
}

/// Profile of the authenticated caller
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(users::get_user))
        .route("/user/name", put(users::update_name))
}

/// Duck and reaction routes
fn duck_routes() -> Router<AppState> {
    Router::new()
        .route("/duck", post(ducks::create_duck))
        .route("/duck/:duck_id", delete(ducks::remove_duck))
        .route("/duck/:duck_id/reaction/:reaction", put(reactions::react))
        .route("/ducks", get(ducks::list_ducks))
        .route("/user/:user_id/ducks", get(ducks::list_user_ducks))
}

fn leaderboard_routes() -> Router<AppState> {
    Router::new().route("/leaderboard", get(leaderboard::get_leaderboard))
}
