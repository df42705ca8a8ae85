//! # emberrt - an in-process actor runtime
//!
//! An actor system with supervision, mailboxes, ask/tell dispatch,
//! dead-letter handling, lifecycle hooks, and a cooperating publish/
//! subscribe event bus. Every actor runs on its own cooperative worker;
//! different actors run in parallel, but a given actor never processes
//! two envelopes at once.
//!
//! This crate is in-process only: there is no remoting, no location
//! transparency, and no durable mailbox. Hierarchical actor paths
//! (`/user/a/b`) are purely an addressing convenience — there is no
//! automatic parent-supervises-child escalation beyond what each actor's
//! own [`SupervisorPolicy`] expresses.
//!
//! # Quick Start
//!
//! ```rust
//! use emberrt::prelude::*;
//! use async_trait::async_trait;
//!
//! #[derive(Debug, Clone)]
//! enum CounterMsg {
//!     Increment,
//!     GetCount(AskReplyHandle<u64>),
//! }
//!
//! impl Message for CounterMsg {
//!     const MESSAGE_TYPE: &'static str = "counter";
//! }
//!
//! struct CounterActor {
//!     count: u64,
//! }
//!
//! #[async_trait]
//! impl Actor for CounterActor {
//!     type Message = CounterMsg;
//!     type Error = std::convert::Infallible;
//!
//!     async fn receive(
//!         &mut self,
//!         msg: Self::Message,
//!         _ctx: &mut ActorContext<Self::Message>,
//!     ) -> Result<ReceiveOutcome, Self::Error> {
//!         match msg {
//!             CounterMsg::Increment => self.count += 1,
//!             CounterMsg::GetCount(reply) => {
//!                 let _ = reply.reply(self.count);
//!             }
//!         }
//!         Ok(ReceiveOutcome::Handled)
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let system = ActorSystem::new(SystemConfig::default());
//! system
//!     .register_prop::<CounterActor, _>(
//!         PropsRegistry::default_prop_id::<CounterActor>(),
//!         || CounterActor { count: 0 },
//!         MailboxKind::default(),
//!         None,
//!     )
//!     .unwrap();
//!
//! let path = ActorPath::root().child("counter");
//! for _ in 0..5 {
//!     system.tell::<CounterActor>(path.clone(), CounterMsg::Increment).await.unwrap();
//! }
//!
//! let count = system
//!     .ask::<CounterActor, u64>(path, CounterMsg::GetCount, std::time::Duration::from_secs(1))
//!     .await
//!     .unwrap();
//! assert_eq!(count, 5);
//! # }
//! ```
//!
//! # Module Organization
//!
//! ## Core actor system
//! - [`actor`] - `Actor` trait, `ActorRef`, `ActorContext`, lifecycle state
//! - [`message`] - `Message` trait, `Envelope`, the ask reply handle
//! - [`mailbox`] - bounded/unbounded FIFO queues with backpressure control
//! - [`props`] - the factory registry actors are spawned from (C3)
//!
//! ## Fault tolerance
//! - [`supervisor`] - per-actor restart policy and backoff tracking (C4)
//! - [`dead_letter`] - the bounded ring of undeliverable/unhandled messages (C7)
//!
//! ## Runtime
//! - [`system`] - `ActorSystem`: registries, dispatch, shutdown coordination (C8)
//! - [`event_bus`] - topic-keyed publish/subscribe, independent of `ActorSystem` (C9)
//! - [`monitoring`] - lifecycle event recording for observability
//! - [`util`] - `ActorId`, `ActorPath`, `MessageId`, `SubscriptionId`
//!
//! # Non-goals
//!
//! - Distributed / cross-process actors — every actor is in-process.
//! - Location transparency or a remoting protocol.
//! - Durable mailboxes or a persistent event log.
//! - Scheduling guarantees finer than FIFO per actor.
//!
//! # See Also
//!
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model)
//! - `DESIGN.md` in the repository root for the grounding behind each module.

pub mod actor;
pub mod dead_letter;
pub mod event_bus;
pub mod mailbox;
pub mod message;
pub mod monitoring;
pub mod prelude;
pub mod props;
pub mod supervisor;
pub mod system;
pub mod util;

// Re-export commonly used types
pub use actor::{Actor, ActorContext, ActorLifecycle, ActorRef, ActorState, ReceiveOutcome};
pub use dead_letter::{DeadLetter, DeadLetterQueue, DeadLetterReason};
pub use event_bus::{EventBus, EventBusError, EventEnvelope, EventSubscriber, TopicFilter};
pub use mailbox::{
    BackpressureStrategy, BoundedMailbox, BoundedMailboxSender, MailboxError, MailboxReceiver,
    MailboxSender, UnboundedMailbox, UnboundedMailboxSender,
};
pub use message::{AskFailure, AskReplyHandle, Envelope, Message, MessagePriority};
pub use monitoring::{
    ActorEvent, ActorEventKind, EventBusEvent, EventBusEventKind, EventSeverity, InMemoryMonitor,
    MailboxEvent, MailboxEventKind, Monitor, MonitoringConfig, MonitoringError, MonitoringEvent,
    MonitoringSnapshot, NoopMonitor, SupervisionEvent, SupervisionEventKind, SystemEvent,
    SystemEventKind,
};
pub use props::{MailboxKind, PropId, PropsError, PropsRegistry};
pub use supervisor::{RestartBackoff, SupervisorError, SupervisorPolicy};
pub use system::{ActorSystem, SystemConfig, SystemError};
pub use util::{ActorId, ActorPath, MessageId, SubscriptionId};
