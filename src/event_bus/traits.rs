//! Core event-bus traits and data types (C9).

// Layer 1: Standard library imports
use std::fmt::Debug;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::{DateTime, Utc}; // §3.2 MANDATORY

// Layer 3: Internal module imports
use super::error::EventBusError;

/// Any type publishable on an [`EventBus`](super::in_memory::EventBus).
///
/// Blanket-implemented for every `Clone + Debug + Send + Sync + 'static`
/// type, the same shape `MonitoringEvent` requires of its events, so one
/// application-defined enum can cover every topic it publishes.
pub trait EventPayload: Clone + Debug + Send + Sync + 'static {}
impl<T: Clone + Debug + Send + Sync + 'static> EventPayload for T {}

/// A published event, stamped with the topic it was published under and
/// when.
#[derive(Debug, Clone)]
pub struct EventEnvelope<E: EventPayload> {
    pub topic: String,
    pub payload: E,
    pub published_at: DateTime<Utc>,
}

/// A subscription's topic match rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicFilter {
    /// Matches every topic.
    Any,
    /// Matches only an exact topic string.
    Exact(String),
}

impl TopicFilter {
    pub fn matches(&self, topic: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => expected == topic,
        }
    }
}

/// A consumer of published events, with its own FIFO worker.
///
/// `on_msg` runs serially on the subscription's own task; a slow or
/// failing subscriber never blocks the publisher or other subscribers
/// (each holds its own mailbox).
#[async_trait]
pub trait EventSubscriber<E: EventPayload>: Send + 'static {
    /// Handle one delivered event.
    async fn on_msg(&mut self, envelope: &EventEnvelope<E>) -> Result<(), EventBusError>;

    /// Called synchronously on the subscriber's worker when `on_msg`
    /// returns an error. Errors here are swallowed; the worker always
    /// continues to the next envelope.
    async fn on_error(&mut self, _error: &EventBusError, _envelope: &EventEnvelope<E>) {}
}
