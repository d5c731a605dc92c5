//! Outbound port for live notifications

use crate::events::LiveEvent;

/// Fan-out target for live events.
///
/// Publishing never fails from the caller's point of view; implementations
/// log and drop what they cannot deliver.
pub trait EventPublisher: Send + Sync {
    /// Deliver `event` to every attached observer, returning how many received it
    fn publish(&self, event: &LiveEvent) -> usize;
}
