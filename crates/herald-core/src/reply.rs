//! # Reply Payloads
//!
//! The bot's handlers return a `ReplyPayload`: the text to deliver plus any
//! presentable actions (the confirmation prompt's buttons). The transport
//! adapter renders actions into the platform's inline keyboard format.

use serde::{Deserialize, Serialize};

/// A presentable action attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptAction {
    /// A button that posts back an opaque callback token.
    Callback {
        /// Button label shown to the user.
        label: String,
        /// Opaque token routed back to the bot when pressed.
        token: String,
    },
    /// A button that opens an external URL.
    Url {
        /// Button label shown to the user.
        label: String,
        /// Target URL.
        url: String,
    },
}

impl PromptAction {
    /// A callback button.
    pub fn callback(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self::Callback {
            label: label.into(),
            token: token.into(),
        }
    }

    /// A URL button.
    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Url {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Text plus optional presentable actions, returned by every handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyPayload {
    /// The message text.
    pub text: String,
    /// Buttons to attach; empty for plain replies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<PromptAction>,
    /// Whether the text uses the platform's Markdown parse mode.
    #[serde(default)]
    pub markdown: bool,
}

impl ReplyPayload {
    /// A plain-text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            actions: Vec::new(),
            markdown: false,
        }
    }

    /// A Markdown-formatted reply.
    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            actions: Vec::new(),
            markdown: true,
        }
    }

    /// Attach actions to this reply.
    pub fn with_actions(mut self, actions: Vec<PromptAction>) -> Self {
        self.actions = actions;
        self
    }

    /// Whether this reply carries any actions.
    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_reply_has_no_actions() {
        let reply = ReplyPayload::text("hello");
        assert_eq!(reply.text, "hello");
        assert!(!reply.has_actions());
        assert!(!reply.markdown);
    }

    #[test]
    fn markdown_reply_sets_flag() {
        assert!(ReplyPayload::markdown("*hi*").markdown);
    }

    #[test]
    fn with_actions_attaches_buttons() {
        let reply = ReplyPayload::text("choose").with_actions(vec![
            PromptAction::callback("Yes", "register_yes:1"),
            PromptAction::url("Contact", "https://t.me/admin"),
        ]);
        assert!(reply.has_actions());
        assert_eq!(reply.actions.len(), 2);
    }

    #[test]
    fn serde_omits_empty_actions() {
        let json = serde_json::to_string(&ReplyPayload::text("x")).expect("serialize");
        assert!(!json.contains("actions"));
    }
}
