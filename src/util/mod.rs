//! Utility types and helpers for the actor system

pub mod ids;
pub mod path;
pub mod serde_helpers;

pub use ids::{ActorId, MessageId, SubscriptionId};
pub use path::ActorPath;
pub use serde_helpers::duration_serde;
