//! # Message Delivery Trait
//!
//! Abstract interface for delivering one message to one recipient. The
//! broadcast fan-out composes over this trait, so the core never touches
//! the wire transport; `herald-api`'s Bot API client is the production
//! implementation, [`MockSender`] the test one.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::RwLock;
use thiserror::Error;

use herald_core::UserId;

/// A single delivery failed.
///
/// Per-recipient and non-fatal: the fan-out accumulates these and keeps
/// going. No retry is attempted.
#[derive(Debug, Clone, Error)]
#[error("delivery to {recipient} failed: {reason}")]
pub struct SendError {
    /// The recipient that did not receive the message.
    pub recipient: UserId,
    /// Description of the failure (blocked bot, dead chat, transport error).
    pub reason: String,
}

/// Delivers one message to one recipient.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// async tasks behind an `Arc`. The trait is object-safe.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Deliver `text` to `recipient`.
    async fn send(&self, recipient: UserId, text: &str) -> Result<(), SendError>;
}

/// Recording sender for tests.
///
/// Deliveries succeed and are recorded unless the recipient is in the
/// configured failure set.
#[derive(Debug, Default)]
pub struct MockSender {
    sent: RwLock<Vec<(UserId, String)>>,
    failing: RwLock<HashSet<UserId>>,
}

impl MockSender {
    /// A sender that delivers everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark recipients whose deliveries should fail.
    pub fn fail_for(&self, recipients: impl IntoIterator<Item = UserId>) {
        self.failing.write().extend(recipients);
    }

    /// Snapshot of successful deliveries, in completion order.
    pub fn sent(&self) -> Vec<(UserId, String)> {
        self.sent.read().clone()
    }
}

#[async_trait]
impl MessageSender for MockSender {
    async fn send(&self, recipient: UserId, text: &str) -> Result<(), SendError> {
        if self.failing.read().contains(&recipient) {
            return Err(SendError {
                recipient,
                reason: "injected delivery failure".to_string(),
            });
        }
        self.sent.write().push((recipient, text.to_string()));
        Ok(())
    }
}
