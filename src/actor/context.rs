//! Per-incarnation actor context: identity plus the handle back into the
//! system that lets an actor spawn children, address siblings, and ask.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};

// Layer 3: Internal module imports
use super::reference::ActorRef;
use crate::message::Message;
use crate::system::ActorSystem;
use crate::util::{ActorId, ActorPath};

/// Context handed to every lifecycle hook and every `receive` call.
///
/// Carries this incarnation's identity (`id` changes across a restart,
/// `path` does not) and a handle to the owning [`ActorSystem`] for
/// `tell`/`ask`/`actor_of` calls made from inside message handling.
pub struct ActorContext<M: Message> {
    path: ActorPath,
    id: ActorId,
    created_at: DateTime<Utc>,
    self_ref: ActorRef<M>,
    system: ActorSystem,
}

impl<M: Message> ActorContext<M> {
    pub(crate) fn new(path: ActorPath, id: ActorId, self_ref: ActorRef<M>, system: ActorSystem) -> Self {
        Self {
            path,
            id,
            created_at: Utc::now(),
            self_ref,
            system,
        }
    }

    /// This incarnation's stable address.
    pub fn path(&self) -> &ActorPath {
        &self.path
    }

    /// This incarnation's identity. Changes on every restart.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// When this incarnation was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// A reference to this actor itself, cheap to clone and hand to a
    /// child or embed in an outgoing message as a reply address.
    pub fn self_ref(&self) -> ActorRef<M> {
        self.self_ref.clone()
    }

    /// The owning actor system, for spawning children or addressing
    /// siblings by path.
    pub fn system(&self) -> &ActorSystem {
        &self.system
    }
}
