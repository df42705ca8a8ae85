//! Backpressure strategies for handling full mailboxes.
//!
//! This module provides backpressure handling strategies for bounded mailboxes,
//! allowing fine-grained control over message delivery behavior when mailboxes
//! reach capacity.
//!
//! `DropOldest` (evicting an already-queued message to make room) is
//! deliberately not offered here: `tokio::mpsc` has no primitive for
//! removing an item from the middle of an already-queued channel, and
//! nothing downstream needs it.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

// Layer 3: Internal module imports
use super::traits::MailboxError;
use crate::message::{Envelope, Message, MessagePriority};

/// Backpressure strategies for handling full mailboxes.
///
/// When a bounded mailbox reaches capacity, the backpressure strategy
/// determines how the system handles additional incoming messages.
///
/// # Strategy Selection
///
/// - **Block**: Critical messages that must be delivered (may cause sender delays)
/// - **DropNewest**: Low priority messages where silent failure is acceptable
/// - **Fail**: Request/response patterns where sender needs immediate feedback
///
/// # Example
///
/// ```
/// use emberrt::mailbox::BackpressureStrategy;
/// use emberrt::message::MessagePriority;
///
/// let strategy = BackpressureStrategy::for_priority(MessagePriority::Critical);
/// assert_eq!(strategy, BackpressureStrategy::Block);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BackpressureStrategy {
    /// Block sender until space becomes available (async wait).
    ///
    /// Use for critical messages that must be delivered. May cause
    /// sender delays if receiver is slow.
    Block,

    /// Drop the incoming message when mailbox is full.
    ///
    /// Use for low-priority messages or scenarios where silent message
    /// dropping is acceptable (e.g., best-effort delivery, logging, metrics).
    DropNewest,

    /// Return an error to the sender immediately.
    ///
    /// Use for request/response patterns where the sender needs to know
    /// immediately if delivery failed (e.g., API calls, synchronous operations).
    #[default]
    Fail,
}

impl fmt::Display for BackpressureStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => write!(f, "Block"),
            Self::DropNewest => write!(f, "DropNewest"),
            Self::Fail => write!(f, "Fail"),
        }
    }
}

impl BackpressureStrategy {
    /// Apply the backpressure strategy to send a message.
    ///
    /// # Errors
    ///
    /// Returns `MailboxError::Full` if strategy is `Fail` and mailbox is full.
    /// Returns `MailboxError::Closed` if the receiver is closed.
    pub async fn apply<M: Message>(
        &self,
        sender: &mpsc::Sender<Envelope<M>>,
        envelope: Envelope<M>,
    ) -> Result<(), MailboxError> {
        match self {
            Self::Block => {
                sender
                    .send(envelope)
                    .await
                    .map_err(|_| MailboxError::Closed)?;
                Ok(())
            }

            Self::DropNewest => match sender.try_send(envelope) {
                Ok(()) => Ok(()),
                Err(mpsc::error::TrySendError::Full(_)) => Ok(()),
                Err(mpsc::error::TrySendError::Closed(_)) => Err(MailboxError::Closed),
            },

            Self::Fail => sender.try_send(envelope).map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => MailboxError::Full {
                    capacity: sender.max_capacity(),
                },
                mpsc::error::TrySendError::Closed(_) => MailboxError::Closed,
            }),
        }
    }

    /// Select appropriate backpressure strategy based on message priority.
    ///
    /// # Strategy Mapping
    ///
    /// - Critical → Block (must be delivered)
    /// - High → Block (important messages)
    /// - Normal → Fail (sender should handle failure)
    /// - Low → DropNewest (can be safely discarded)
    ///
    /// # Example
    ///
    /// ```
    /// use emberrt::mailbox::BackpressureStrategy;
    /// use emberrt::message::MessagePriority;
    ///
    /// let strategy = BackpressureStrategy::for_priority(MessagePriority::Low);
    /// assert_eq!(strategy, BackpressureStrategy::DropNewest);
    /// ```
    pub fn for_priority(priority: MessagePriority) -> Self {
        match priority {
            MessagePriority::Critical => Self::Block,
            MessagePriority::High => Self::Block,
            MessagePriority::Normal => Self::Fail,
            MessagePriority::Low => Self::DropNewest,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct TestMsg {
        content: String,
    }

    impl Message for TestMsg {
        const MESSAGE_TYPE: &'static str = "test_msg";
    }

    #[test]
    fn test_backpressure_strategy_default() {
        assert_eq!(BackpressureStrategy::default(), BackpressureStrategy::Fail);
    }

    #[test]
    fn test_backpressure_strategy_display() {
        assert_eq!(BackpressureStrategy::Block.to_string(), "Block");
        assert_eq!(BackpressureStrategy::DropNewest.to_string(), "DropNewest");
        assert_eq!(BackpressureStrategy::Fail.to_string(), "Fail");
    }

    #[test]
    fn test_strategy_for_priority_critical() {
        assert_eq!(
            BackpressureStrategy::for_priority(MessagePriority::Critical),
            BackpressureStrategy::Block
        );
    }

    #[test]
    fn test_strategy_for_priority_normal() {
        assert_eq!(
            BackpressureStrategy::for_priority(MessagePriority::Normal),
            BackpressureStrategy::Fail
        );
    }

    #[test]
    fn test_strategy_for_priority_low() {
        assert_eq!(
            BackpressureStrategy::for_priority(MessagePriority::Low),
            BackpressureStrategy::DropNewest
        );
    }

    #[tokio::test]
    async fn test_apply_block_strategy() {
        let (sender, mut receiver) = mpsc::channel::<Envelope<TestMsg>>(2);
        let envelope = Envelope::new(TestMsg {
            content: "test".to_string(),
        });

        BackpressureStrategy::Block
            .apply(&sender, envelope)
            .await
            .unwrap();

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.payload().unwrap().content, "test");
    }

    #[tokio::test]
    async fn test_apply_block_strategy_waits() {
        use std::time::Duration;
        use tokio::time::sleep;

        let (sender, mut receiver) = mpsc::channel::<Envelope<TestMsg>>(1);

        sender
            .try_send(Envelope::new(TestMsg {
                content: "first".to_string(),
            }))
            .unwrap();

        let sender_clone = sender.clone();
        let handle = tokio::spawn(async move {
            BackpressureStrategy::Block
                .apply(
                    &sender_clone,
                    Envelope::new(TestMsg {
                        content: "second".to_string(),
                    }),
                )
                .await
        });

        sleep(Duration::from_millis(10)).await;
        receiver.recv().await.unwrap();
        handle.await.unwrap().unwrap();

        let second = receiver.recv().await.unwrap();
        assert_eq!(second.payload().unwrap().content, "second");
    }

    #[tokio::test]
    async fn test_apply_fail_strategy_full() {
        let (sender, _receiver) = mpsc::channel::<Envelope<TestMsg>>(1);

        sender
            .try_send(Envelope::new(TestMsg {
                content: "first".to_string(),
            }))
            .unwrap();

        let result = BackpressureStrategy::Fail
            .apply(
                &sender,
                Envelope::new(TestMsg {
                    content: "second".to_string(),
                }),
            )
            .await;

        assert!(matches!(result, Err(MailboxError::Full { .. })));
    }

    #[tokio::test]
    async fn test_apply_drop_newest_strategy() {
        let (sender, mut receiver) = mpsc::channel::<Envelope<TestMsg>>(1);

        sender
            .try_send(Envelope::new(TestMsg {
                content: "first".to_string(),
            }))
            .unwrap();

        BackpressureStrategy::DropNewest
            .apply(
                &sender,
                Envelope::new(TestMsg {
                    content: "second".to_string(),
                }),
            )
            .await
            .unwrap();

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.payload().unwrap().content, "first");
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_apply_closed_channel() {
        let (sender, receiver) = mpsc::channel::<Envelope<TestMsg>>(1);
        drop(receiver);

        for strategy in [
            BackpressureStrategy::Block,
            BackpressureStrategy::Fail,
            BackpressureStrategy::DropNewest,
        ] {
            let result = strategy
                .apply(
                    &sender,
                    Envelope::new(TestMsg {
                        content: "test".to_string(),
                    }),
                )
                .await;
            assert!(matches!(result, Err(MailboxError::Closed)));
        }
    }

    #[test]
    fn test_strategy_equality() {
        assert_eq!(BackpressureStrategy::Block, BackpressureStrategy::Block);
        assert_ne!(BackpressureStrategy::Block, BackpressureStrategy::Fail);
    }
}
