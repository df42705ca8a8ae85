//! Fault tolerance: restart policy and backoff tracking (C4).
//!
//! There is no supervision tree here. Each actor declares its own
//! [`SupervisorPolicy`] at registration time; the runtime applies it
//! directly when that actor's `receive` returns an error. A parent/child
//! hierarchy still exists for addressing (`ActorPath`, `ActorSystem::children`),
//! but restart decisions are local to the failing actor, not escalated
//! through a tree of supervisors.
//!
//! # Components
//!
//! - [`SupervisorPolicy`] - `Stop` / `Restart` / `RestartWithBackoff`
//! - [`RestartBackoff`] - sliding-window restart counter with exponential delay
//! - [`SupervisorError`] - restart-budget and restart-failure errors

pub mod backoff;
pub mod error;
pub mod policy;

pub use backoff::RestartBackoff;
pub use error::SupervisorError;
pub use policy::SupervisorPolicy;
