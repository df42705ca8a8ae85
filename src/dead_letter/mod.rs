//! Dead-letter queue (C7): a bounded ring buffer recording messages that
//! could not be, or were not, delivered to an actor.
//!
//! The queue is system-wide, holding records for actors of every message
//! type, so it cannot keep the original typed payload around (there is no
//! single type to store it as). Each record keeps the message's `Debug`
//! rendering and its `Message::MESSAGE_TYPE` instead — enough to diagnose
//! what happened without erasing the queue's own type behind `dyn Any`.

// Layer 1: Standard library imports
use std::collections::VecDeque;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use parking_lot::Mutex;

// Layer 3: Internal module imports
use crate::util::path::ActorPath;

/// Why a message ended up in the dead-letter queue instead of being
/// handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadLetterReason {
    /// `receive` returned `ReceiveOutcome::Unhandled`.
    UnhandledMessage,
    /// `tell`/`ask` targeted a path whose actor had already terminated.
    DeliveryToTerminated,
    /// The mailbox rejected the envelope under a `Fail` backpressure
    /// strategy.
    MailboxFull,
    /// The message was drained from a mailbox during `shutdownAwait`.
    ShutdownInFlight,
    /// An `ask`'s embedded deadline had already passed when the envelope
    /// reached the front of the mailbox.
    AskExpired,
}

/// A single dead-letter record.
#[derive(Debug, Clone)]
pub struct DeadLetter {
    /// `Debug` rendering of the message that was not delivered.
    pub message: String,
    /// `Message::MESSAGE_TYPE` of the undelivered message.
    pub message_type: &'static str,
    /// The path the message was addressed to.
    pub recipient: ActorPath,
    /// When the message was recorded.
    pub timestamp: DateTime<Utc>,
    /// Why the message was not delivered.
    pub reason: DeadLetterReason,
}

impl DeadLetter {
    pub(crate) fn new(
        message: String,
        message_type: &'static str,
        recipient: ActorPath,
        reason: DeadLetterReason,
    ) -> Self {
        Self {
            message,
            message_type,
            recipient,
            timestamp: Utc::now(), // §3.2
            reason,
        }
    }
}

/// Bounded ring buffer of [`DeadLetter`] records (C7).
///
/// Push-only from the runtime's perspective: [`DeadLetterQueue::recent`]
/// takes a snapshot copy and never drains the underlying buffer, per
/// `spec.md`'s "observation does not consume" contract.
pub struct DeadLetterQueue {
    capacity: usize,
    entries: Mutex<VecDeque<DeadLetter>>,
}

/// Default ring capacity (spec.md §4.7).
pub const DEFAULT_DEAD_LETTER_CAPACITY: usize = 10_000;

impl DeadLetterQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
        }
    }

    /// Record a dead letter, evicting the oldest entry if the ring is
    /// full.
    pub(crate) fn record(&self, letter: DeadLetter) {
        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(letter);
    }

    /// Snapshot-copy of up to `limit` most-recent entries, newest first.
    /// Does not drain the queue.
    pub fn recent(&self, limit: usize) -> Vec<DeadLetter> {
        let entries = self.entries.lock();
        entries.iter().rev().take(limit).cloned().collect()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DeadLetterQueue {
    fn default() -> Self {
        Self::new(DEFAULT_DEAD_LETTER_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(n: u32) -> DeadLetter {
        DeadLetter::new(
            format!("msg-{n}"),
            "test",
            ActorPath::root().child("actor"),
            DeadLetterReason::UnhandledMessage,
        )
    }

    #[test]
    fn recent_returns_newest_first() {
        let queue = DeadLetterQueue::new(10);
        queue.record(letter(1));
        queue.record(letter(2));
        queue.record(letter(3));

        let recent = queue.recent(10);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].message, "msg-3");
        assert_eq!(recent[2].message, "msg-1");
    }

    #[test]
    fn ring_evicts_oldest_past_capacity() {
        let queue = DeadLetterQueue::new(2);
        queue.record(letter(1));
        queue.record(letter(2));
        queue.record(letter(3));

        let recent = queue.recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "msg-3");
        assert_eq!(recent[1].message, "msg-2");
    }

    #[test]
    fn observation_does_not_drain() {
        let queue = DeadLetterQueue::new(10);
        queue.record(letter(1));
        let _ = queue.recent(10);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn limit_caps_the_snapshot() {
        let queue = DeadLetterQueue::new(10);
        for i in 0..5 {
            queue.record(letter(i));
        }
        assert_eq!(queue.recent(2).len(), 2);
    }
}
