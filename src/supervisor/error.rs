//! Error types for supervisor operations.

// Layer 1: Standard library imports
use std::error::Error as StdError;

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::util::ActorPath;

/// Errors surfaced while applying a [`SupervisorPolicy`](super::SupervisorPolicy).
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// The actor's restart budget (`max_retries` within `reset_after`) was
    /// exhausted; the actor is stopped instead of restarted.
    #[error("restart budget exhausted for {path} after {restart_count} restarts")]
    RestartBudgetExhausted {
        path: ActorPath,
        restart_count: u32,
    },

    /// `pre_restart`, `post_restart`, or the actor's factory itself failed
    /// while trying to bring up a fresh incarnation.
    #[error("failed to restart actor at {path}: {source}")]
    RestartFailed {
        path: ActorPath,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl SupervisorError {
    /// Whether the actor should be considered permanently stopped after
    /// this error (as opposed to one more restart attempt being possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::RestartBudgetExhausted { .. })
    }
}
