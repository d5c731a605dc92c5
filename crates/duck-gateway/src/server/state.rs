//! Gateway state
//!
//! Shared state for the live WebSocket endpoint.

use std::sync::Arc;

use duck_common::NotifierConfig;

use crate::notifier::LiveNotifier;

/// Gateway state
#[derive(Clone)]
pub struct GatewayState {
    /// Hub observers attach to
    notifier: Arc<LiveNotifier>,
    /// Capacity of each observer's outbound queue
    queue_size: usize,
}

impl GatewayState {
    pub fn new(notifier: Arc<LiveNotifier>, config: &NotifierConfig) -> Self {
        Self {
            notifier,
            queue_size: config.queue_size.max(1),
        }
    }

    pub fn notifier(&self) -> &LiveNotifier {
        &self.notifier
    }

    pub fn queue_size(&self) -> usize {
        self.queue_size
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("notifier", &self.notifier)
            .field("queue_size", &self.queue_size)
            .finish()
    }
}
