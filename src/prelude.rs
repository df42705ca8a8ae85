//! Convenient glob import for building actors with emberrt.
//!
//! ```rust
//! use emberrt::prelude::*;
//! ```
//!
//! # What's Included
//!
//! ## Core actor system
//! - [`Actor`] - the trait every actor implements
//! - [`ActorContext`] - identity, system handle, self-reference for hooks
//! - [`ActorRef`] - cloneable, typed handle used to `tell`/`ask` an actor
//! - [`ActorLifecycle`] / [`ActorState`] - restart-aware state tracking
//! - [`ReceiveOutcome`] - `Handled` / `Unhandled`, drives the dead-letter path
//!
//! ## Messaging
//! - [`Message`] - trait every message payload implements
//! - [`Envelope`] - the FIFO wrapper carrying a payload plus routing metadata
//! - [`AskReplyHandle`] - one-shot reply slot embedded in a request message
//! - [`AskFailure`] - the error an actor can complete an ask with via `fail`
//!
//! ## Mailbox
//! - [`BoundedMailbox`] / [`UnboundedMailbox`] - the two mailbox shapes
//! - [`BackpressureStrategy`] - `Block` / `DropNewest` / `Fail`
//! - [`MailboxReceiver`] / [`MailboxSender`] - the queue's two halves
//!
//! ## Props registry
//! - [`PropsRegistry`] - propId -> factory bindings (C3)
//! - [`MailboxKind`] - the mailbox shape a registered prop is given
//!
//! ## Supervision
//! - [`SupervisorPolicy`] - `Stop` / `Restart` / `RestartWithBackoff`
//! - [`RestartBackoff`] - sliding-window restart counter
//!
//! ## Dead letters
//! - [`DeadLetter`] / [`DeadLetterReason`] - undeliverable/unhandled records
//!
//! ## Runtime
//! - [`ActorSystem`] - the top-level container (C8)
//! - [`SystemConfig`] - `ActorSystem` configuration
//!
//! ## Event bus
//! - [`EventBus`] - topic-keyed publish/subscribe (C9)
//! - [`EventSubscriber`] / [`TopicFilter`] - the subscriber contract and filter
//!
//! ## Monitoring
//! - [`Monitor`] - core monitoring trait
//! - [`InMemoryMonitor`] / [`NoopMonitor`] - the two implementations
//!
//! ## Utilities
//! - [`ActorPath`] - hierarchical actor addressing
//! - [`ActorId`] / [`MessageId`] / [`SubscriptionId`] - identity newtypes
//!
//! # Example
//!
//! ```rust
//! use emberrt::prelude::*;
//! use async_trait::async_trait;
//!
//! #[derive(Debug, Clone)]
//! struct Ping;
//!
//! impl Message for Ping {
//!     const MESSAGE_TYPE: &'static str = "ping";
//! }
//!
//! struct Counter {
//!     count: u64,
//! }
//!
//! #[async_trait]
//! impl Actor for Counter {
//!     type Message = Ping;
//!     type Error = std::convert::Infallible;
//!
//!     async fn receive(
//!         &mut self,
//!         _msg: Self::Message,
//!         _ctx: &mut ActorContext<Self::Message>,
//!     ) -> Result<ReceiveOutcome, Self::Error> {
//!         self.count += 1;
//!         Ok(ReceiveOutcome::Handled)
//!     }
//! }
//! ```

// Core actor system
pub use crate::actor::{Actor, ActorContext, ActorLifecycle, ActorRef, ActorState, ReceiveOutcome};

// Messaging
pub use crate::message::{AskFailure, AskReplyHandle, Envelope, Message, MessagePriority};

// Mailbox
pub use crate::mailbox::{
    BackpressureStrategy, BoundedMailbox, BoundedMailboxSender, MailboxReceiver, MailboxSender,
    UnboundedMailbox, UnboundedMailboxSender,
};

// Props registry
pub use crate::props::{MailboxKind, PropsRegistry};

// Supervision
pub use crate::supervisor::{RestartBackoff, SupervisorPolicy};

// Dead letters
pub use crate::dead_letter::{DeadLetter, DeadLetterReason};

// Event bus
pub use crate::event_bus::{EventBus, EventSubscriber, TopicFilter};

// Monitoring
pub use crate::monitoring::{
    ActorEvent, EventBusEvent, EventSeverity, InMemoryMonitor, MailboxEvent, Monitor, NoopMonitor,
    SupervisionEvent,
};

// Runtime
pub use crate::system::{ActorSystem, SystemConfig};

// Utilities
pub use crate::util::{ActorId, ActorPath, MessageId, SubscriptionId};
