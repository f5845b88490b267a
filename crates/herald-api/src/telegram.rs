//! # Telegram Wire Types
//!
//! The subset of the Bot API payloads Herald actually consumes and
//! produces. Inbound types deliberately do NOT use `deny_unknown_fields` —
//! the platform adds fields freely and an update must never be rejected
//! for carrying one we do not read.

use serde::{Deserialize, Serialize};

use herald_core::{PromptAction, ReplyPayload, UserProfile};

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// One inbound webhook event.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonic update identifier assigned by the platform.
    pub update_id: i64,
    /// Present for new-message updates.
    #[serde(default)]
    pub message: Option<Message>,
    /// Present for button-press updates.
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

/// An inbound message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Message identifier within the chat.
    pub message_id: i64,
    /// The sender; absent for channel posts.
    #[serde(default)]
    pub from: Option<TgUser>,
    /// The chat the message arrived in.
    pub chat: Chat,
    /// Text content; absent for media messages.
    #[serde(default)]
    pub text: Option<String>,
}

/// A platform user as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct TgUser {
    /// Platform-assigned identifier.
    pub id: i64,
    /// Username without the `@`, if set.
    #[serde(default)]
    pub username: Option<String>,
    /// First name, if supplied.
    #[serde(default)]
    pub first_name: Option<String>,
}

impl TgUser {
    /// Convert into the domain profile type.
    pub fn to_profile(&self) -> UserProfile {
        UserProfile::new(self.id, self.username.clone(), self.first_name.clone())
    }
}

/// The chat a message belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Chat identifier (equals the user identifier for private chats).
    pub id: i64,
}

/// A button press on an inline keyboard.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    /// Identifier to acknowledge the press with.
    pub id: String,
    /// The user who pressed the button.
    pub from: TgUser,
    /// The message the keyboard was attached to, when still available.
    #[serde(default)]
    pub message: Option<Message>,
    /// The callback data of the pressed button.
    #[serde(default)]
    pub data: Option<String>,
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// `sendMessage` request body.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessage {
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl SendMessage {
    /// Render a reply payload for the given chat.
    pub fn from_reply(chat_id: i64, reply: &ReplyPayload) -> Self {
        Self {
            chat_id,
            text: reply.text.clone(),
            parse_mode: parse_mode(reply),
            reply_markup: InlineKeyboardMarkup::from_actions(&reply.actions),
        }
    }
}

/// `editMessageText` request body.
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageText {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl EditMessageText {
    /// Render a reply payload as an in-place edit of an existing message.
    pub fn from_reply(chat_id: i64, message_id: i64, reply: &ReplyPayload) -> Self {
        Self {
            chat_id,
            message_id,
            text: reply.text.clone(),
            parse_mode: parse_mode(reply),
            reply_markup: InlineKeyboardMarkup::from_actions(&reply.actions),
        }
    }
}

/// `answerCallbackQuery` request body.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerCallbackQuery {
    pub callback_query_id: String,
}

/// Inline keyboard attachment.
#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    /// Render prompt actions as a keyboard: callback buttons share the
    /// first row, each URL button gets its own row below.
    ///
    /// Returns `None` for an empty action list so plain replies carry no
    /// `reply_markup` field at all.
    pub fn from_actions(actions: &[PromptAction]) -> Option<Self> {
        if actions.is_empty() {
            return None;
        }

        let mut callback_row = Vec::new();
        let mut url_rows = Vec::new();
        for action in actions {
            match action {
                PromptAction::Callback { label, token } => {
                    callback_row.push(InlineKeyboardButton::callback(label, token));
                }
                PromptAction::Url { label, url } => {
                    url_rows.push(vec![InlineKeyboardButton::url(label, url)]);
                }
            }
        }

        let mut inline_keyboard = Vec::new();
        if !callback_row.is_empty() {
            inline_keyboard.push(callback_row);
        }
        inline_keyboard.extend(url_rows);
        Some(Self { inline_keyboard })
    }
}

/// One inline keyboard button.
#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InlineKeyboardButton {
    fn callback(label: &str, token: &str) -> Self {
        Self {
            text: label.to_string(),
            callback_data: Some(token.to_string()),
            url: None,
        }
    }

    fn url(label: &str, url: &str) -> Self {
        Self {
            text: label.to_string(),
            callback_data: None,
            url: Some(url.to_string()),
        }
    }
}

/// Bot API response envelope. The `result` document is ignored — Herald
/// only needs the ok/description pair.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}

fn parse_mode(reply: &ReplyPayload) -> Option<&'static str> {
    reply.markdown.then_some("Markdown")
}
