//! # Outbound Transport Trait
//!
//! The webhook handlers deliver replies through this trait rather than the
//! concrete client, so router tests run without a network. The production
//! implementation is [`TelegramClient`](crate::client::TelegramClient);
//! [`RecordingOutbound`] is the test double.

use async_trait::async_trait;
use parking_lot::RwLock;

use herald_core::ReplyPayload;

use crate::client::ClientError;

/// Delivers webhook replies back to the platform.
#[async_trait]
pub trait Outbound: Send + Sync {
    /// Send a fresh message to a chat.
    async fn send_reply(&self, chat_id: i64, reply: &ReplyPayload) -> Result<(), ClientError>;

    /// Replace an existing message in place (used to retire the prompt
    /// after a button press).
    async fn edit_reply(
        &self,
        chat_id: i64,
        message_id: i64,
        reply: &ReplyPayload,
    ) -> Result<(), ClientError>;

    /// Acknowledge a callback query so the client stops its spinner.
    async fn ack_callback(&self, callback_id: &str) -> Result<(), ClientError>;
}

/// Recording transport for router tests. Every call succeeds.
#[derive(Debug, Default)]
pub struct RecordingOutbound {
    sends: RwLock<Vec<(i64, ReplyPayload)>>,
    edits: RwLock<Vec<(i64, i64, ReplyPayload)>>,
    acks: RwLock<Vec<String>>,
}

impl RecordingOutbound {
    /// A fresh recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of `send_reply` calls.
    pub fn sends(&self) -> Vec<(i64, ReplyPayload)> {
        self.sends.read().clone()
    }

    /// Snapshot of `edit_reply` calls.
    pub fn edits(&self) -> Vec<(i64, i64, ReplyPayload)> {
        self.edits.read().clone()
    }

    /// Snapshot of acknowledged callback identifiers.
    pub fn acks(&self) -> Vec<String> {
        self.acks.read().clone()
    }
}

#[async_trait]
impl Outbound for RecordingOutbound {
    async fn send_reply(&self, chat_id: i64, reply: &ReplyPayload) -> Result<(), ClientError> {
        self.sends.write().push((chat_id, reply.clone()));
        Ok(())
    }

    async fn edit_reply(
        &self,
        chat_id: i64,
        message_id: i64,
        reply: &ReplyPayload,
    ) -> Result<(), ClientError> {
        self.edits.write().push((chat_id, message_id, reply.clone()));
        Ok(())
    }

    async fn ack_callback(&self, callback_id: &str) -> Result<(), ClientError> {
        self.acks.write().push(callback_id.to_string());
        Ok(())
    }
}
