//! Actor factory registry (C3).
//!
//! `ActorSystem` never constructs an actor directly from a value the
//! caller already owns; it constructs one from a registered `Props` entry
//! so that a restart can call the same factory again to build a fresh
//! incarnation. Registration happens once per `PropId`; spawning
//! (`actor_of`) and messaging (`tell`/`ask`) both look the entry back up
//! by that id.

pub mod registry;

pub use registry::{MailboxKind, PropId, PropsError, PropsRegistry, ResolvedProps};
