//! Concurrent, topic-keyed pub/sub implementation of the event bus (C9).
//!
//! Each subscription owns its own bounded mailbox and a dedicated worker
//! task — the same shape every live actor gets (mailbox in, single
//! consumer) — so one slow subscriber can never stall `publish` or a
//! sibling subscriber. Grounded on `broker/registry.rs`'s `DashMap`-backed
//! concurrent registry, adapted from address-keyed routing to
//! topic-and-predicate-keyed fan-out.

// Layer 1: Standard library imports
use std::fmt::Debug;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use chrono::Utc; // §3.2 MANDATORY
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::warn;

// Layer 3: Internal module imports
use super::error::EventBusError;
use super::traits::{EventEnvelope, EventPayload, EventSubscriber, TopicFilter};
use crate::util::SubscriptionId;

/// Default bounded capacity for a subscription's mailbox.
pub const DEFAULT_SUBSCRIPTION_MAILBOX_CAPACITY: usize = 256;

/// A pure filter evaluated against an envelope before it is delivered.
pub type Predicate<E> = Arc<dyn Fn(&EventEnvelope<E>) -> bool + Send + Sync>;
type PublishErrorHandler<E> = Arc<dyn Fn(SubscriptionId, &EventEnvelope<E>) + Send + Sync>;

struct Subscription<E: EventPayload> {
    sender: mpsc::Sender<EventEnvelope<E>>,
    topic_filter: TopicFilter,
    predicate: Option<Predicate<E>>,
}

/// Topic-keyed publish/subscribe bus (C9).
///
/// Independent of `ActorSystem`: it reuses the mailbox-and-worker
/// discipline actors use, but owns its own subscription table and does
/// not route through the live-actor map or dead-letter queue.
pub struct EventBus<E: EventPayload> {
    subscriptions: Arc<DashMap<SubscriptionId, Subscription<E>>>,
    mailbox_capacity: usize,
    on_publish_error: PublishErrorHandler<E>,
}

impl<E: EventPayload> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            subscriptions: Arc::clone(&self.subscriptions),
            mailbox_capacity: self.mailbox_capacity,
            on_publish_error: Arc::clone(&self.on_publish_error),
        }
    }
}

impl<E: EventPayload> EventBus<E> {
    pub fn new() -> Self {
        Self::with_mailbox_capacity(DEFAULT_SUBSCRIPTION_MAILBOX_CAPACITY)
    }

    pub fn with_mailbox_capacity(mailbox_capacity: usize) -> Self {
        Self {
            subscriptions: Arc::new(DashMap::new()),
            mailbox_capacity,
            on_publish_error: Arc::new(|subscription_id, envelope| {
                warn!(
                    subscription = %subscription_id,
                    topic = %envelope.topic,
                    "dropping event: subscriber mailbox full"
                );
            }),
        }
    }

    /// Override the default "log and drop" behavior for a full subscriber
    /// mailbox (spec's `onPublishError`, default no-op beyond logging).
    pub fn with_publish_error_handler(
        mut self,
        handler: impl Fn(SubscriptionId, &EventEnvelope<E>) + Send + Sync + 'static,
    ) -> Self {
        self.on_publish_error = Arc::new(handler);
        self
    }

    /// Register a subscriber. Spawns its dedicated worker task immediately;
    /// the subscriber starts receiving as soon as this call returns.
    pub fn subscribe<S>(
        &self,
        subscriber: S,
        topic_filter: TopicFilter,
        predicate: Option<Predicate<E>>,
    ) -> SubscriptionId
    where
        S: EventSubscriber<E>,
    {
        let (sender, receiver) = mpsc::channel(self.mailbox_capacity);
        let subscription_id = SubscriptionId::new();

        self.subscriptions.insert(
            subscription_id,
            Subscription {
                sender,
                topic_filter,
                predicate,
            },
        );

        tokio::spawn(Self::run_subscriber(subscription_id, subscriber, receiver));

        subscription_id
    }

    async fn run_subscriber<S: EventSubscriber<E>>(
        subscription_id: SubscriptionId,
        mut subscriber: S,
        mut receiver: mpsc::Receiver<EventEnvelope<E>>,
    ) {
        while let Some(envelope) = receiver.recv().await {
            if let Err(error) = subscriber.on_msg(&envelope).await {
                let error = match error {
                    EventBusError::HandlerFailed { .. } => error,
                    other => EventBusError::HandlerFailed {
                        subscription: subscription_id,
                        topic: envelope.topic.clone(),
                        reason: other.to_string(),
                    },
                };
                subscriber.on_error(&error, &envelope).await;
            }
        }
    }

    /// Non-blocking fan-out to every matching subscriber. A subscriber
    /// whose mailbox is full does not block delivery to the rest; its
    /// envelope is dropped and `on_publish_error` is invoked for it.
    pub fn publish(&self, topic: impl Into<String>, payload: E) {
        let topic = topic.into();
        let envelope = EventEnvelope {
            topic,
            payload,
            published_at: Utc::now(), // §3.2
        };

        for entry in self.subscriptions.iter() {
            let subscription = entry.value();
            if !subscription.topic_filter.matches(&envelope.topic) {
                continue;
            }
            if let Some(predicate) = &subscription.predicate {
                if !predicate(&envelope) {
                    continue;
                }
            }
            if subscription.sender.try_send(envelope.clone()).is_err() {
                (self.on_publish_error)(*entry.key(), &envelope);
            }
        }
    }

    /// Idempotent: returns `false` if `subscription_id` was not (or no
    /// longer) registered. Dropping the subscription's sender lets its
    /// worker task drain and exit on its own.
    pub fn unsubscribe(&self, subscription_id: SubscriptionId) -> bool {
        self.subscriptions.remove(&subscription_id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl<E: EventPayload> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}
