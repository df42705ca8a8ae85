// Layer 1: Standard library imports
use std::fmt::Debug;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use super::traits::{Message, MessagePriority};
use crate::util::ids::MessageId;
use crate::util::path::ActorPath;

/// Which FIFO class an envelope belongs to.
///
/// `spec.md` leaves the relative ordering of `System` and `User` envelopes
/// unspecified when both are pending; FIFO is only guaranteed within each
/// class (e.g. `PoisonPill` and `Terminate` are `System`, ordered against
/// each other, but may overtake or trail already-queued `User` messages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvelopeKind {
    /// An ordinary message delivered via `tell`/`ask`.
    User,
    /// A runtime-internal control message (`PoisonPill`, `Terminate`).
    System,
}

/// A runtime-internal control signal, delivered through the same mailbox
/// as user messages rather than out-of-band (§4.5: no priority channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemSignal {
    /// Stop cleanly after draining prior messages. Not an error; runs
    /// `post_stop`.
    PoisonPill,
    /// Stop immediately without invoking `receive` on the message that
    /// triggered it. Still runs `post_stop`.
    Terminate,
}

/// The body of an envelope: either a user message or a system signal.
///
/// A dedicated enum rather than overloading `M` itself (e.g. requiring
/// every actor's message type to carry its own `PoisonPill` variant) keeps
/// system control flow a tagged envelope variant the runtime owns, instead
/// of an exception or a message the actor has to recognize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EnvelopeBody<M> {
    /// An ordinary message bound for the actor's `receive`.
    User(M),
    /// A control signal bound for the runtime's receive loop.
    System(SystemSignal),
}

/// Generic message envelope with zero-cost abstraction
///
/// # Type Safety
/// The envelope is generic over the message type M, ensuring compile-time
/// type safety without runtime dispatch or type erasure.
///
/// # Example
/// ```rust
/// use emberrt::message::{Envelope, Message, MessagePriority};
/// use emberrt::util::ActorPath;
///
/// #[derive(Debug, Clone)]
/// struct MyMessage {
///     content: String,
/// }
///
/// impl Message for MyMessage {
///     const MESSAGE_TYPE: &'static str = "my_message";
/// }
///
/// let msg = MyMessage { content: "Hello".to_string() };
/// let sender = ActorPath::root().child("sender");
///
/// let envelope = Envelope::new(msg)
///     .with_sender(sender)
///     .with_ttl(60);
///
/// assert_eq!(envelope.message_type(), "my_message");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<M: Message> {
    /// Unique identity of this envelope, used for dead-letter correlation.
    pub id: MessageId,

    /// The envelope body: a user message or a system signal.
    pub body: EnvelopeBody<M>,

    /// Optional sender path, for reply capability
    pub sender: Option<ActorPath>,

    /// Optional reply-to path, for reply-to patterns distinct from sender
    pub reply_to: Option<ActorPath>,

    /// Message creation timestamp (§3.2 chrono `DateTime<Utc>`)
    pub timestamp: DateTime<Utc>,

    /// Message priority (extracted from payload; `Normal` for system signals)
    pub priority: MessagePriority,

    /// Optional time-to-live in seconds
    pub ttl: Option<u64>,

    /// Wall-clock deadline for an in-flight `ask`, if this envelope carries
    /// an embedded `AskReplyHandle`. The receiving actor never inspects
    /// this field itself; it exists so the caller's `ask` future can tell
    /// `AskExpired` apart from a reply that simply never arrives.
    pub ask_deadline: Option<DateTime<Utc>>,
}

impl<M: Message> Envelope<M> {
    /// Create a new user envelope with minimal information.
    pub fn new(payload: M) -> Self {
        let priority = payload.priority();
        Self {
            id: MessageId::new(),
            body: EnvelopeBody::User(payload),
            sender: None,
            reply_to: None,
            timestamp: Utc::now(), // §3.2 chrono standard
            priority,
            ttl: None,
            ask_deadline: None,
        }
    }

    /// Create a new system envelope carrying a control signal
    /// (`PoisonPill`, `Terminate`). Does not require an `M` value since the
    /// signal is not routed through the actor's `receive`.
    pub fn system(signal: SystemSignal) -> Self {
        Self {
            id: MessageId::new(),
            body: EnvelopeBody::System(signal),
            sender: None,
            reply_to: None,
            timestamp: Utc::now(),
            priority: MessagePriority::default(),
            ttl: None,
            ask_deadline: None,
        }
    }

    /// Which FIFO class this envelope belongs to.
    pub fn kind(&self) -> EnvelopeKind {
        match &self.body {
            EnvelopeBody::User(_) => EnvelopeKind::User,
            EnvelopeBody::System(_) => EnvelopeKind::System,
        }
    }

    /// Builder method: set sender path
    pub fn with_sender(mut self, sender: ActorPath) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Builder method: set reply-to path
    pub fn with_reply_to(mut self, reply_to: ActorPath) -> Self {
        self.reply_to = Some(reply_to);
        self
    }

    /// Builder method: set time-to-live in seconds
    pub fn with_ttl(mut self, ttl_seconds: u64) -> Self {
        self.ttl = Some(ttl_seconds);
        self
    }

    /// Builder method: set the wall-clock deadline for an embedded ask reply.
    pub fn with_ask_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.ask_deadline = Some(deadline);
        self
    }

    /// Has the ask deadline, if any, already passed?
    pub fn is_ask_expired(&self) -> bool {
        match self.ask_deadline {
            Some(deadline) => Utc::now() > deadline,
            None => false,
        }
    }

    /// Check if message has expired based on TTL
    pub fn is_expired(&self) -> bool {
        if let Some(ttl) = self.ttl {
            let age = Utc::now()
                .signed_duration_since(self.timestamp)
                .num_seconds() as u64;
            age > ttl
        } else {
            false
        }
    }

    /// Get message type from payload's const. Valid regardless of body,
    /// since `M::MESSAGE_TYPE` is determined by the envelope's type
    /// parameter, not by which variant this particular instance carries.
    pub fn message_type(&self) -> &'static str {
        M::MESSAGE_TYPE
    }

    /// Consume the envelope, returning its body.
    pub fn into_body(self) -> EnvelopeBody<M> {
        self.body
    }

    /// Borrow the user payload, if this envelope carries one.
    pub fn payload(&self) -> Option<&M> {
        match &self.body {
            EnvelopeBody::User(message) => Some(message),
            EnvelopeBody::System(_) => None,
        }
    }

    /// Consume the envelope, returning its user payload.
    pub fn into_payload(self) -> Option<M> {
        match self.body {
            EnvelopeBody::User(message) => Some(message),
            EnvelopeBody::System(_) => None,
        }
    }
}
