//! Typed, cloneable handle for sending messages to a spawned actor.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::mailbox::traits::{MailboxError, MailboxSender};
use crate::mailbox::{AtomicMetrics, BoundedMailboxSender, UnboundedMailboxSender};
use crate::message::{Envelope, Message, SystemSignal};
use crate::util::path::ActorPath;

/// Either half of the bounded/unbounded mailbox sender pair.
///
/// Erased behind a 2-variant enum rather than `Box<dyn MailboxSender<M>>`:
/// `MailboxSender` requires `Clone`, which is not object-safe, and there
/// are exactly two concrete senders to choose between (§6.2 — prefer a
/// closed enum over `dyn` when the set of implementors is fixed).
#[derive(Clone)]
pub enum ActorMailboxSender<M: Message> {
    /// Backed by a capacity-limited channel.
    Bounded(BoundedMailboxSender<M, AtomicMetrics>),
    /// Backed by an unlimited channel.
    Unbounded(UnboundedMailboxSender<M, AtomicMetrics>),
}

impl<M: Message> ActorMailboxSender<M> {
    /// Send an envelope, applying the mailbox's backpressure strategy.
    pub async fn send(&self, envelope: Envelope<M>) -> Result<(), MailboxError> {
        match self {
            Self::Bounded(s) => s.send(envelope).await,
            Self::Unbounded(s) => s.send(envelope).await,
        }
    }

    /// Send an envelope without waiting for mailbox space.
    pub fn try_send(&self, envelope: Envelope<M>) -> Result<(), MailboxError> {
        match self {
            Self::Bounded(s) => s.try_send(envelope),
            Self::Unbounded(s) => s.try_send(envelope),
        }
    }
}

/// A stable, cloneable address for a spawned actor.
///
/// `ActorRef` survives restarts: the mailbox channel underneath it is kept
/// alive across a restart (the failed incarnation's in-flight message is
/// dropped, not the channel — §9 "restart does not redeliver"), so a
/// reference taken before a restart keeps working unmodified afterwards.
#[derive(Clone)]
pub struct ActorRef<M: Message> {
    path: ActorPath,
    sender: ActorMailboxSender<M>,
}

impl<M: Message> ActorRef<M> {
    pub(crate) fn new(path: ActorPath, sender: ActorMailboxSender<M>) -> Self {
        Self { path, sender }
    }

    /// The stable address this reference points at.
    pub fn path(&self) -> &ActorPath {
        &self.path
    }

    /// Fire-and-forget delivery of a user message.
    pub async fn tell(&self, message: M) -> Result<(), MailboxError> {
        self.sender.send(Envelope::new(message)).await
    }

    /// Deliver a pre-built envelope (used internally for system messages
    /// and for `ask`, which needs to attach a deadline).
    pub(crate) async fn tell_envelope(&self, envelope: Envelope<M>) -> Result<(), MailboxError> {
        self.sender.send(envelope).await
    }

    /// Best-effort delivery that never waits for mailbox space.
    pub fn try_tell(&self, message: M) -> Result<(), MailboxError> {
        self.sender.try_send(Envelope::new(message))
    }

    /// Deliver a control signal (`PoisonPill`, `Terminate`). Used by the
    /// owning system to stop an actor; never called by application code
    /// directly (there is no `SystemSignal` value to construct outside the
    /// crate).
    pub(crate) async fn tell_system(&self, signal: SystemSignal) -> Result<(), MailboxError> {
        self.sender.send(Envelope::system(signal)).await
    }
}
