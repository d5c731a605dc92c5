//! Live notifier
//!
//! In-memory fan-out of live events to WebSocket observers.

mod hub;
mod observer;

pub use hub::LiveNotifier;
pub use observer::{Observer, ObserverId};
