//! Notifier hub
//!
//! Tracks attached observers in a `DashMap` and fans events out to them.

use std::sync::Arc;

use dashmap::DashMap;
use duck_core::events::LiveEvent;
use duck_core::traits::EventPublisher;
use tokio::sync::mpsc::{self, error::TrySendError};

use super::observer::{Observer, ObserverId};

/// Fan-out hub for live events
///
/// Each observer owns a bounded queue. Publishing never waits on a socket:
/// an observer whose queue is full or closed is detached instead.
pub struct LiveNotifier {
    observers: DashMap<ObserverId, Observer>,
}

impl LiveNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: DashMap::new(),
        }
    }

    /// Create a new notifier wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register the outbound queue of a new connection
    pub fn attach(&self, sender: mpsc::Sender<Arc<str>>) -> ObserverId {
        let id = ObserverId::generate();
        self.observers.insert(id, Observer::new(sender));

        tracing::debug!(observer_id = %id, observers = self.observers.len(), "Observer attached");

        id
    }

    /// Remove an observer. Returns `false` if it was already gone.
    pub fn detach(&self, id: ObserverId) -> bool {
        match self.observers.remove(&id) {
            Some((_, observer)) => {
                tracing::debug!(
                    observer_id = %id,
                    connected_secs = observer.connected_for().as_secs(),
                    "Observer detached"
                );
                true
            }
            None => false,
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn is_attached(&self, id: ObserverId) -> bool {
        self.observers.contains_key(&id)
    }

    /// Queue an already serialized payload to every observer
    fn deliver(&self, payload: &Arc<str>) -> (usize, usize) {
        // Snapshot so no map shard is locked while sending
        let targets: Vec<(ObserverId, Observer)> = self
            .observers
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        let mut delivered = 0;
        let mut failed = Vec::new();

        for (id, observer) in targets {
            match observer.try_send(Arc::clone(payload)) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(observer_id = %id, "Observer queue full, detaching");
                    failed.push(id);
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!(observer_id = %id, "Observer gone, detaching");
                    failed.push(id);
                }
            }
        }

        let detached = failed.into_iter().filter(|id| self.detach(*id)).count();
        (delivered, detached)
    }
}

impl EventPublisher for LiveNotifier {
    fn publish(&self, event: &LiveEvent) -> usize {
        let payload: Arc<str> = match serde_json::to_string(event) {
            Ok(json) => json.into(),
            Err(e) => {
                tracing::error!(
                    event_type = event.event_type.as_str(),
                    error = %e,
                    "Failed to serialize live event"
                );
                return 0;
            }
        };

        let (delivered, detached) = self.deliver(&payload);

        tracing::debug!(
            event_type = event.event_type.as_str(),
            delivered,
            detached,
            "Live event published"
        );

        delivered
    }
}

impl Default for LiveNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LiveNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveNotifier")
            .field("observers", &self.observers.len())
            .finish()
    }
}
