//! Reply handle for the ask pattern (C6).
//!
//! `ask` is not a distinct envelope variant. A caller that wants a reply
//! constructs its request message carrying an [`AskReplyHandle<R>`] field,
//! the same way it would carry any other payload; the responding actor
//! calls [`AskReplyHandle::reply`] or [`AskReplyHandle::fail`] exactly like
//! it would send a message to any other address. This keeps `Actor::receive`
//! free of a second, ask-specific code path.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use tokio::sync::oneshot;

// Layer 3: Internal module imports
// (none)

/// The error an actor hands back via [`AskReplyHandle::fail`] instead of
/// completing the ask with a value.
#[derive(Debug, Clone)]
pub struct AskFailure(String);

impl AskFailure {
    /// Wrap a human-readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

impl fmt::Display for AskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for AskFailure {}

impl From<String> for AskFailure {
    fn from(reason: String) -> Self {
        Self(reason)
    }
}

impl From<&str> for AskFailure {
    fn from(reason: &str) -> Self {
        Self(reason.to_string())
    }
}

/// A one-shot reply slot embedded in a request message.
///
/// Backed by [`tokio::sync::oneshot`], which already gives first-write-wins
/// semantics for free: `reply`/`fail` consume `self`, so it is a compile
/// error to call either twice, and if the corresponding `ask` future has
/// already timed out and dropped its receiver, completing the handle simply
/// hands the value back to the caller instead of panicking.
///
/// # Example
///
/// ```rust
/// use emberrt::message::AskReplyHandle;
/// use tokio::sync::oneshot;
///
/// # tokio_test::block_on(async {
/// let (tx, rx) = oneshot::channel();
/// let handle = AskReplyHandle::<u64>::new(tx);
/// handle.reply(42).unwrap();
/// assert_eq!(rx.await.unwrap().unwrap(), 42);
/// # });
/// ```
pub struct AskReplyHandle<R> {
    sender: oneshot::Sender<Result<R, AskFailure>>,
}

impl<R> AskReplyHandle<R> {
    /// Wrap a oneshot sender as a reply handle.
    pub fn new(sender: oneshot::Sender<Result<R, AskFailure>>) -> Self {
        Self { sender }
    }

    /// Deliver a successful reply, consuming the handle.
    ///
    /// Returns `Err(value)` if the asker already gave up (timed out or
    /// dropped its receiver) — the value is handed back so the caller can
    /// decide what to do with an unclaimed reply instead of it silently
    /// vanishing.
    pub fn reply(self, value: R) -> Result<(), R> {
        match self.sender.send(Ok(value)) {
            Ok(()) => Ok(()),
            Err(Ok(value)) => Err(value),
            Err(Err(_)) => unreachable!("reply() never sends the Err branch"),
        }
    }

    /// Complete the ask with an error instead of a value (§4.6: the
    /// `AsyncResult` completes with "the exception passed to `handle.fail(e)`").
    ///
    /// Returns `Err(error)` if the asker already gave up, for the same
    /// reason [`reply`](Self::reply) does.
    pub fn fail(self, error: impl Into<AskFailure>) -> Result<(), AskFailure> {
        match self.sender.send(Err(error.into())) {
            Ok(()) => Ok(()),
            Err(Err(error)) => Err(error),
            Err(Ok(_)) => unreachable!("fail() never sends the Ok branch"),
        }
    }
}

impl<R> fmt::Debug for AskReplyHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AskReplyHandle(..)")
    }
}
