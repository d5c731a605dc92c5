//! # duck-gateway
//!
//! Live notifier and the WebSocket endpoint that feeds it to browsers.

pub mod notifier;
pub mod server;

pub use notifier::{LiveNotifier, ObserverId};
pub use server::{create_router, live_handler, GatewayState};
