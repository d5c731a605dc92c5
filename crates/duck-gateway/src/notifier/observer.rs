//! A single attached observer

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use uuid::Uuid;

/// Identifier handed out on attach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(Uuid);

impl ObserverId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Outbound side of one WebSocket connection.
///
/// Payloads are pre-serialized and shared, so every observer receives the
/// same allocation.
#[derive(Debug, Clone)]
pub struct Observer {
    sender: mpsc::Sender<Arc<str>>,
    attached_at: Instant,
}

impl Observer {
    pub fn new(sender: mpsc::Sender<Arc<str>>) -> Self {
        Self {
            sender,
            attached_at: Instant::now(),
        }
    }

    /// Queue a payload without waiting
    pub fn try_send(
        &self,
        payload: Arc<str>,
    ) -> Result<(), mpsc::error::TrySendError<Arc<str>>> {
        self.sender.try_send(payload)
    }

    pub fn connected_for(&self) -> Duration {
        self.attached_at.elapsed()
    }
}
