//! Topic-keyed publish/subscribe event bus (C9).
//!
//! Independent of `ActorSystem`: actors talk to each other and to the
//! system through `tell`/`ask` on an `ActorRef`, never through this bus.
//! `EventBus` exists for fan-out notification (one event, many
//! subscribers) rather than point-to-point delivery, and owns its own
//! per-subscriber mailboxes and workers rather than routing through the
//! live-actor map.
//!
//! # Components
//!
//! - [`EventBus`] - the bus itself: `subscribe` / `publish` / `unsubscribe`
//! - [`EventSubscriber`] - the trait a subscriber implements
//! - [`TopicFilter`] - `Any` or an exact topic match
//! - [`EventEnvelope`] - a published event plus its topic and timestamp
//! - [`EventBusError`] - subscriber handler failures

pub mod error;
pub mod in_memory;
pub mod traits;

pub use error::EventBusError;
pub use in_memory::{EventBus, Predicate, DEFAULT_SUBSCRIPTION_MAILBOX_CAPACITY};
pub use traits::{EventEnvelope, EventPayload, EventSubscriber, TopicFilter};
