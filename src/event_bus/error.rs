//! Error types for the event bus (C9).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::util::SubscriptionId;

/// Failure delivering to, or handling an event inside, a subscriber.
#[derive(Debug, Clone, Error)]
pub enum EventBusError {
    /// A subscriber's `on_msg` reported a processing failure.
    #[error("subscriber {subscription} failed to handle event on topic '{topic}': {reason}")]
    HandlerFailed {
        subscription: SubscriptionId,
        topic: String,
        reason: String,
    },

    /// `unsubscribe` was called with an id that is not (or no longer)
    /// registered.
    #[error("no subscription registered under id {0}")]
    UnknownSubscription(SubscriptionId),
}
