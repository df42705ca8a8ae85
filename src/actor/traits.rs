//! The `Actor` trait: an isolated unit of state plus a message handler.

// Layer 1: Standard library imports
use std::error::Error;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::context::ActorContext;
use crate::message::Message;

/// What an actor did with a message it was handed.
///
/// `Unhandled` lets an actor decline a message without treating it as a
/// failure: the runtime records it to the dead-letter queue instead of
/// running the restart machinery, the same way an unmatched message falls
/// through to `unhandled` in classic actor frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// The actor processed the message.
    Handled,
    /// The actor did not recognize or did not act on the message.
    Unhandled,
}

/// Core trait implemented by every actor.
///
/// An actor owns its state exclusively; the runtime guarantees that
/// `receive` is never called concurrently with itself or with the
/// lifecycle hooks for the same incarnation (no reentrancy, §5). Actors
/// do not implement supervision themselves — restart behavior is declared
/// separately via [`crate::supervisor::SupervisorPolicy`] when the actor is
/// registered or spawned.
///
/// # Example
///
/// ```rust
/// use emberrt::actor::{Actor, ActorContext, ReceiveOutcome};
/// use emberrt::message::Message;
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// enum CounterMsg {
///     Increment,
/// }
///
/// impl Message for CounterMsg {
///     const MESSAGE_TYPE: &'static str = "counter";
/// }
///
/// struct Counter {
///     count: u64,
/// }
///
/// #[async_trait]
/// impl Actor for Counter {
///     type Message = CounterMsg;
///     type Error = std::convert::Infallible;
///
///     async fn receive(
///         &mut self,
///         msg: Self::Message,
///         _ctx: &mut ActorContext<Self::Message>,
///     ) -> Result<ReceiveOutcome, Self::Error> {
///         match msg {
///             CounterMsg::Increment => self.count += 1,
///         }
///         Ok(ReceiveOutcome::Handled)
///     }
/// }
/// ```
#[async_trait]
pub trait Actor: Send + 'static {
    /// The message type this actor accepts.
    type Message: Message;

    /// The error type returned by the lifecycle hooks and `receive`.
    ///
    /// An error returned from `receive` triggers the actor's
    /// [`SupervisorPolicy`](crate::supervisor::SupervisorPolicy): `Stop`,
    /// `Restart`, or `RestartWithBackoff`.
    type Error: Error + Send + Sync + 'static;

    /// Called once before the actor's mailbox loop starts.
    ///
    /// An error here is treated exactly like an error from `receive`: it is
    /// handed to the actor's supervisor policy.
    async fn pre_start(&mut self, _ctx: &mut ActorContext<Self::Message>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle one message from the mailbox.
    async fn receive(
        &mut self,
        message: Self::Message,
        ctx: &mut ActorContext<Self::Message>,
    ) -> Result<ReceiveOutcome, Self::Error>;

    /// Called once after the actor stops for good (not on restart).
    async fn post_stop(&mut self, _ctx: &mut ActorContext<Self::Message>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called on the failed incarnation right before it is discarded, with
    /// the error that triggered the restart. The default does nothing;
    /// override to release resources the failing instance was holding.
    async fn pre_restart(
        &mut self,
        _error: &Self::Error,
        _ctx: &mut ActorContext<Self::Message>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called on the fresh incarnation right after it replaces the failed
    /// one, before it starts receiving messages again. Equivalent to
    /// `pre_start` for the new instance; the default simply calls it.
    async fn post_restart(&mut self, ctx: &mut ActorContext<Self::Message>) -> Result<(), Self::Error> {
        self.pre_start(ctx).await
    }
}
