//! Gateway routes
//!
//! The live endpoint is a plain router so the API binary can merge it next
//! to the REST routes.

mod live;
mod state;

pub use live::live_handler;
pub use state::GatewayState;

use axum::{routing::get, Router};

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new().route("/ws", get(live_handler))
}
