//! Factory bindings, keyed by prop id (C3).
//!
//! A `Props` entry is everything `ActorSystem` needs to create and host an
//! actor without knowing its concrete type outside of a generic call site:
//! a factory closure, the mailbox shape to give it, and the restart policy
//! to apply if it fails. The registry itself only stores these behind
//! `Box<dyn Any + Send + Sync>`; the type is recovered by downcasting back
//! to `Arc<dyn Fn() -> A + Send + Sync>` at the generic call site
//! (`register_prop::<A>`, `actor_of::<A>`), never inside the registry.

// Layer 1: Standard library imports
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::actor::Actor;
use crate::mailbox::BackpressureStrategy;
use crate::supervisor::SupervisorPolicy;

/// Identifies a registered `Props` entry. Defaults to
/// `std::any::type_name::<A>()` when an actor is registered without an
/// explicit id, but callers are free to register the same actor type
/// under several distinct ids (e.g. a worker pool of the same type).
pub type PropId = String;

/// The mailbox an actor created from a `Props` entry is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MailboxKind {
    /// Capacity-limited mailbox with the given backpressure strategy.
    Bounded(usize, BackpressureStrategy),
    /// Unlimited mailbox.
    Unbounded,
}

impl Default for MailboxKind {
    fn default() -> Self {
        Self::Bounded(1000, BackpressureStrategy::Fail)
    }
}

/// Failure registering a `Props` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropsError {
    /// `prop_id` is already registered with a different actor type or
    /// mailbox shape. Re-registering with an identical signature is a
    /// no-op, not an error.
    Conflict(PropId),
    /// No `Props` entry exists under this id.
    NotFound(PropId),
}

impl fmt::Display for PropsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict(id) => write!(f, "props id '{id}' already registered with a different signature"),
            Self::NotFound(id) => write!(f, "no props registered under id '{id}'"),
        }
    }
}

impl std::error::Error for PropsError {}

struct PropsEntry {
    actor_type: TypeId,
    factory: Arc<dyn Any + Send + Sync>,
    mailbox_kind: MailboxKind,
    default_policy: Option<SupervisorPolicy>,
}

/// A looked-up `Props` entry, downcast back to its concrete actor type.
pub struct ResolvedProps<A: Actor> {
    pub factory: Arc<dyn Fn() -> A + Send + Sync>,
    pub mailbox_kind: MailboxKind,
    pub default_policy: Option<SupervisorPolicy>,
}

/// Concurrent registry of actor factories (C3).
///
/// Backed by `DashMap` for the same reason the live-actor map in
/// `ActorSystem` is: many actors may register or spawn children
/// concurrently, and a single coarse lock would serialize all of them.
#[derive(Default)]
pub struct PropsRegistry {
    entries: DashMap<PropId, PropsEntry>,
}

impl PropsRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Register a factory under `prop_id`. Registering the same actor type
    /// and mailbox kind again under the same id is a no-op; registering a
    /// different actor type or mailbox kind under an id already in use is
    /// a [`PropsError::Conflict`].
    pub fn register<A, F>(
        &self,
        prop_id: impl Into<PropId>,
        factory: F,
        mailbox_kind: MailboxKind,
        default_policy: Option<SupervisorPolicy>,
    ) -> Result<(), PropsError>
    where
        A: Actor,
        F: Fn() -> A + Send + Sync + 'static,
    {
        let prop_id = prop_id.into();
        let actor_type = TypeId::of::<A>();

        if let Some(existing) = self.entries.get(&prop_id) {
            return if existing.actor_type == actor_type && existing.mailbox_kind == mailbox_kind {
                Ok(())
            } else {
                Err(PropsError::Conflict(prop_id))
            };
        }

        let factory: Arc<dyn Fn() -> A + Send + Sync> = Arc::new(factory);
        self.entries.insert(
            prop_id,
            PropsEntry {
                actor_type,
                factory: Arc::new(factory),
                mailbox_kind,
                default_policy,
            },
        );
        Ok(())
    }

    /// Look up the `Props` entry for `prop_id`, downcasting its factory
    /// back to `A`. Returns `None` if the id is unregistered or was
    /// registered for a different actor type.
    pub fn lookup<A: Actor>(&self, prop_id: &str) -> Option<ResolvedProps<A>> {
        let entry = self.entries.get(prop_id)?;
        if entry.actor_type != TypeId::of::<A>() {
            return None;
        }
        let factory = entry
            .factory
            .clone()
            .downcast::<Arc<dyn Fn() -> A + Send + Sync>>()
            .ok()?;
        Some(ResolvedProps {
            factory: (*factory).clone(),
            mailbox_kind: entry.mailbox_kind,
            default_policy: entry.default_policy.clone(),
        })
    }

    /// Whether any `Props` entry is registered under this id.
    pub fn contains(&self, prop_id: &str) -> bool {
        self.entries.contains_key(prop_id)
    }

    /// Default `PropId` for an actor type registered without an explicit
    /// id: its fully qualified type name.
    pub fn default_prop_id<A: Actor>() -> PropId {
        std::any::type_name::<A>().to_string()
    }
}
