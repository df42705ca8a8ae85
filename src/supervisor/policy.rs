//! Declarative, per-actor restart policy (C4).
//!
//! Unlike a BEAM-style supervision tree, a policy here is plain data
//! attached to an actor at registration time, not a separate supervisor
//! entity that computes a decision from the failing child's state. This
//! keeps the restart decision inspectable and testable without spinning up
//! an actor at all.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::backoff::RestartBackoff;

/// What the runtime does when an actor's `receive` (or a lifecycle hook)
/// returns an error.
#[derive(Debug, Clone)]
pub enum SupervisorPolicy {
    /// Stop the actor. It is removed from the live-actor table and no
    /// further messages are delivered to it.
    Stop,

    /// Always restart, with no backoff and no limit on attempt count.
    /// Suitable for actors whose failures are expected to be transient
    /// and rare enough that a restart storm is not a concern.
    Restart,

    /// Restart with exponential backoff between attempts, within a
    /// bounded retry budget. Once `max_retries` restarts have happened
    /// inside `reset_after` (mirrors [`RestartBackoff`]'s sliding window),
    /// the actor is stopped instead of restarted again.
    RestartWithBackoff {
        /// Delay before the first restart attempt.
        min_delay: Duration,
        /// Ceiling the exponential delay is capped at.
        max_delay: Duration,
        /// Restart budget within the window. `None` means unbounded.
        max_retries: Option<u32>,
        /// Sliding window the restart budget is measured over.
        reset_after: Duration,
    },
}

impl SupervisorPolicy {
    /// `RestartWithBackoff` using the same defaults as [`RestartBackoff::default`]:
    /// 5 restarts per 60s, starting at 100ms and capping at 60s.
    pub fn restart_with_default_backoff() -> Self {
        Self::RestartWithBackoff {
            min_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(60),
            max_retries: Some(5),
            reset_after: Duration::from_secs(60),
        }
    }

    /// Build the `RestartBackoff` tracker this policy implies, or `None`
    /// for policies that don't use one (`Stop`, unconditional `Restart`).
    pub(crate) fn new_backoff_tracker(&self) -> Option<RestartBackoff> {
        match self {
            Self::Stop | Self::Restart => None,
            Self::RestartWithBackoff {
                min_delay,
                max_delay,
                max_retries,
                reset_after,
            } => Some(RestartBackoff::with_delays(
                max_retries.unwrap_or(u32::MAX),
                *reset_after,
                *min_delay,
                *max_delay,
            )),
        }
    }
}

impl Default for SupervisorPolicy {
    fn default() -> Self {
        Self::restart_with_default_backoff()
    }
}
