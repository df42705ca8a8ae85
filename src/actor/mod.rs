//! Actors: isolated units of state that communicate only by message.
//!
//! # Components
//!
//! - [`Actor`] - the trait every actor implements
//! - [`ActorContext`] - identity and system handle passed to every hook
//! - [`ActorRef`] - cloneable, typed handle used to `tell` an actor
//! - [`ActorLifecycle`] / [`ActorState`] - restart-aware state tracking
//!
//! # Design Philosophy
//!
//! - Actors own their state exclusively; the runtime never calls into an
//!   actor concurrently with itself (§5 no-reentrancy).
//! - Supervision is declared separately from the actor
//!   ([`crate::supervisor::SupervisorPolicy`]), not computed by it — restart
//!   behavior is data, not code, so it can be audited and tested without an
//!   actor instance.
//! - No `dyn Actor` anywhere: every actor is spawned through a monomorphized
//!   path, and only the bookkeeping layer (the system's live-actor table)
//!   erases behind `Box<dyn Any>` (§6.2).

pub mod context;
pub mod lifecycle;
pub mod reference;
pub mod traits;

pub use context::ActorContext;
pub use lifecycle::{ActorLifecycle, ActorState};
pub use reference::{ActorMailboxSender, ActorRef};
pub use traits::{Actor, ReceiveOutcome};
