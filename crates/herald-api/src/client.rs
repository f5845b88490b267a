//! # Bot API Client
//!
//! Typed reqwest client for the outbound Bot API calls Herald makes:
//! `sendMessage`, `editMessageText`, `answerCallbackQuery`. Wraps a
//! `reqwest::Client` with the bot token, a per-request timeout, and
//! consistent error mapping.
//!
//! Retries are NOT built in — broadcast delivery is best-effort by
//! contract, and webhook replies are one-shot.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use herald_core::{ReplyPayload, UserId};
use herald_service::{MessageSender, SendError};

use crate::telegram::{
    AnswerCallbackQuery, ApiResponse, EditMessageText, SendMessage,
};
use crate::transport::Outbound;

/// Default Bot API host.
const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Configuration for the Bot API client.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Base URL of the Bot API (overridden in tests).
    pub base_url: String,
    /// Bot token issued by the platform.
    pub token: String,
    /// Request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl TelegramConfig {
    /// Create a configuration with the default host and timeout.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            timeout_secs: 30,
        }
    }

    /// Override the base URL (wiremock tests, self-hosted Bot API).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Errors from Bot API calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The client could not be constructed or the configuration is invalid.
    #[error("Bot API client not configured: {reason}")]
    NotConfigured {
        /// Why configuration is invalid.
        reason: String,
    },

    /// The Bot API is unreachable or returned an unreadable response.
    #[error("Bot API unavailable: {reason}")]
    ServiceUnavailable {
        /// Description of the failure.
        reason: String,
    },

    /// The request timed out.
    #[error("Bot API request timed out after {elapsed_ms}ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        elapsed_ms: u64,
    },

    /// The Bot API rejected the call (`ok: false`).
    #[error("Bot API rejected the call: {description}")]
    Rejected {
        /// The platform's error description.
        description: String,
    },
}

/// Typed client for the Bot API methods Herald uses.
#[derive(Debug)]
pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    timeout_ms: u64,
}

impl TelegramClient {
    /// Build a client from configuration.
    pub fn new(config: TelegramConfig) -> Result<Self, ClientError> {
        if config.token.is_empty() {
            return Err(ClientError::NotConfigured {
                reason: "bot token must not be empty".to_string(),
            });
        }
        url::Url::parse(&config.base_url).map_err(|e| ClientError::NotConfigured {
            reason: format!("invalid base URL {:?}: {e}", config.base_url),
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::ServiceUnavailable {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
            timeout_ms: config.timeout_secs * 1_000,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    /// POST one Bot API method and interpret the response envelope.
    async fn call<B: Serialize>(&self, method: &str, body: &B) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout {
                        elapsed_ms: self.timeout_ms,
                    }
                } else {
                    ClientError::ServiceUnavailable {
                        reason: format!("{method}: {e}"),
                    }
                }
            })?;

        let status = response.status();
        let envelope: ApiResponse =
            response
                .json()
                .await
                .map_err(|e| ClientError::ServiceUnavailable {
                    reason: format!("{method}: unreadable response (HTTP {status}): {e}"),
                })?;

        if !envelope.ok {
            return Err(ClientError::Rejected {
                description: envelope
                    .description
                    .unwrap_or_else(|| format!("{method}: HTTP {status}")),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Outbound for TelegramClient {
    async fn send_reply(&self, chat_id: i64, reply: &ReplyPayload) -> Result<(), ClientError> {
        self.call("sendMessage", &SendMessage::from_reply(chat_id, reply))
            .await
    }

    async fn edit_reply(
        &self,
        chat_id: i64,
        message_id: i64,
        reply: &ReplyPayload,
    ) -> Result<(), ClientError> {
        self.call(
            "editMessageText",
            &EditMessageText::from_reply(chat_id, message_id, reply),
        )
        .await
    }

    async fn ack_callback(&self, callback_id: &str) -> Result<(), ClientError> {
        self.call(
            "answerCallbackQuery",
            &AnswerCallbackQuery {
                callback_query_id: callback_id.to_string(),
            },
        )
        .await
    }
}

#[async_trait]
impl MessageSender for TelegramClient {
    async fn send(&self, recipient: UserId, text: &str) -> Result<(), SendError> {
        self.send_reply(recipient.as_i64(), &ReplyPayload::text(text))
            .await
            .map_err(|e| SendError {
                recipient,
                reason: e.to_string(),
            })
    }
}
