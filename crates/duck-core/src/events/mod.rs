//! Live events pushed to connected observers

mod live_event;

pub use live_event::{LiveEvent, LiveEventType};
