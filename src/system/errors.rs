//! System-level error types.

// Layer 1: Standard library
use std::time::Duration;

// Layer 2: Third-party
use thiserror::Error;

// Layer 3: Internal
use crate::mailbox::MailboxError;
use crate::props::PropId;
use crate::util::ActorPath;

/// System-level errors for actor runtime operations.
#[derive(Error, Debug)]
pub enum SystemError {
    /// The system's shutdown flag is set; new `tell`/`ask`/`actor_of`
    /// calls are rejected synchronously.
    #[error("system is shutting down")]
    ShuttingDown,

    /// `tell`/`ask`/`actor_of` targeted a `PropId` that was never passed
    /// to `register_prop`.
    #[error("no props registered under id '{0}'")]
    PropNotRegistered(PropId),

    /// `register_prop` was called twice for the same id with a different
    /// actor type or mailbox shape.
    #[error("props id '{0}' already registered with a different signature")]
    PropsConflict(PropId),

    /// `actor_of` targeted a path that is already live under a different
    /// `PropId`.
    #[error("path '{path}' is live as '{found}', not '{expected}'")]
    ActorPathConflict {
        path: ActorPath,
        expected: PropId,
        found: PropId,
    },

    /// The target actor's mailbox rejected the envelope (bounded,
    /// `Fail` backpressure, currently full).
    #[error("mailbox full for actor at '{0}'")]
    MailboxFull(ActorPath),

    /// The target actor's mailbox is closed; its incarnation has already
    /// terminated.
    #[error("mailbox closed for actor at '{0}'")]
    MailboxClosed(ActorPath),

    /// An `ask` did not receive a reply before its deadline.
    #[error("ask to '{path}' timed out after {timeout:?}")]
    AskTimeout { path: ActorPath, timeout: Duration },

    /// The target actor completed the ask with `AskReplyHandle::fail`
    /// instead of a value.
    #[error("ask to '{path}' failed: {reason}")]
    AskFailed { path: ActorPath, reason: String },

    /// Failed to spawn actor
    #[error("failed to spawn actor: {0}")]
    SpawnFailed(String),

    /// Configuration validation error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Actor limit exceeded
    #[error("actor limit exceeded: current {current}, max {max}")]
    ActorLimitExceeded { current: usize, max: usize },

    /// Shutdown timeout exceeded
    #[error("shutdown timeout exceeded after {0:?}")]
    ShutdownTimeout(Duration),
}

impl SystemError {
    /// Attach the target path to a mailbox-level failure. `ActorSystem`
    /// knows the path a `tell`/`ask` was addressed to; `MailboxError`
    /// itself does not carry one.
    pub(crate) fn from_mailbox_error(error: MailboxError, path: ActorPath) -> Self {
        match error {
            MailboxError::Closed => SystemError::MailboxClosed(path),
            MailboxError::Full { .. }
            | MailboxError::BackpressureApplied { .. }
            | MailboxError::TtlExpired { .. } => SystemError::MailboxFull(path),
        }
    }

    /// Check if error is transient (can retry).
    pub fn is_transient(&self) -> bool {
        matches!(self, SystemError::MailboxFull(_))
    }

    /// Check if error is fatal (system must stop).
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SystemError::ShuttingDown | SystemError::ShutdownTimeout(_)
        )
    }

    /// Check if error is recoverable.
    pub fn is_recoverable(&self) -> bool {
        !self.is_fatal()
    }
}
