//! Live event envelope
//!
//! Every message pushed over the live channel has the shape
//! `{"type": "<event type>", "data": <payload>}`.

use serde::{Deserialize, Serialize};

/// Types of live events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiveEventType {
    NewDuckCreated,
}

impl LiveEventType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewDuckCreated => "new_duck_created",
        }
    }
}

/// Envelope sent to observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveEvent {
    #[serde(rename = "type")]
    pub event_type: LiveEventType,
    pub data: serde_json::Value,
}

impl LiveEvent {
    pub fn new(event_type: LiveEventType, data: serde_json::Value) -> Self {
        Self { event_type, data }
    }

    /// Build a `new_duck_created` event from any serializable duck payload
    pub fn new_duck_created<T: Serialize>(duck: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::new(
            LiveEventType::NewDuckCreated,
            serde_json::to_value(duck)?,
        ))
    }
}
