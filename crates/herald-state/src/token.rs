//! # Callback Token Codec
//!
//! Encodes a pending confirmation into the callback data attached to the
//! prompt's buttons, and decodes inbound callback data back into a typed
//! token. The wire format is `register_yes:{id}` / `register_no:{id}` —
//! both actions carry the identity the prompt was issued for, so the
//! ownership check can run regardless of which button was pressed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use herald_core::UserId;

/// The two mutually exclusive prompt actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmAction {
    /// The user opted in.
    Confirm,
    /// The user opted out.
    Decline,
}

impl ConfirmAction {
    /// The wire prefix for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirm => "register_yes",
            Self::Decline => "register_no",
        }
    }

    fn from_wire(s: &str) -> Option<Self> {
        match s {
            "register_yes" => Some(Self::Confirm),
            "register_no" => Some(Self::Decline),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors decoding inbound callback data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The data does not split into `action:identity`.
    #[error("malformed callback token: {data:?}")]
    Malformed {
        /// The raw callback data.
        data: String,
    },

    /// The action prefix is not one of the known actions.
    #[error("unknown callback action: {action:?}")]
    UnknownAction {
        /// The unrecognized prefix.
        action: String,
    },

    /// The identity segment is not a well-formed integer.
    #[error("invalid identity in callback token: {value:?}")]
    InvalidIdentity {
        /// The unparseable segment.
        value: String,
    },
}

/// A decoded confirmation token: which button, and who the prompt was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackToken {
    /// Which of the two actions was pressed.
    pub action: ConfirmAction,
    /// The identity the prompt was issued for.
    pub issued_for: UserId,
}

impl CallbackToken {
    /// Build a token for the given action and target identity.
    pub fn new(action: ConfirmAction, issued_for: UserId) -> Self {
        Self { action, issued_for }
    }

    /// Render the wire form, e.g. `register_yes:123456789`.
    pub fn encode(&self) -> String {
        format!("{}:{}", self.action.as_str(), self.issued_for)
    }

    /// Decode callback data into a token.
    pub fn parse(data: &str) -> Result<Self, TokenError> {
        let (action, identity) = data.split_once(':').ok_or_else(|| TokenError::Malformed {
            data: data.to_string(),
        })?;

        let action = ConfirmAction::from_wire(action).ok_or_else(|| TokenError::UnknownAction {
            action: action.to_string(),
        })?;

        let issued_for = UserId::parse(identity).ok_or_else(|| TokenError::InvalidIdentity {
            value: identity.to_string(),
        })?;

        Ok(Self { action, issued_for })
    }
}

impl std::fmt::Display for CallbackToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encode_confirm() {
        let token = CallbackToken::new(ConfirmAction::Confirm, UserId::new(123456789));
        assert_eq!(token.encode(), "register_yes:123456789");
    }

    #[test]
    fn encode_decline() {
        let token = CallbackToken::new(ConfirmAction::Decline, UserId::new(42));
        assert_eq!(token.encode(), "register_no:42");
    }

    #[test]
    fn parse_confirm() {
        let token = CallbackToken::parse("register_yes:123456789").expect("valid token");
        assert_eq!(token.action, ConfirmAction::Confirm);
        assert_eq!(token.issued_for, UserId::new(123456789));
    }

    #[test]
    fn parse_decline() {
        let token = CallbackToken::parse("register_no:42").expect("valid token");
        assert_eq!(token.action, ConfirmAction::Decline);
        assert_eq!(token.issued_for, UserId::new(42));
    }

    #[test]
    fn parse_rejects_missing_identity() {
        let err = CallbackToken::parse("register_yes").unwrap_err();
        assert!(matches!(err, TokenError::Malformed { .. }));
    }

    #[test]
    fn parse_rejects_unknown_action() {
        let err = CallbackToken::parse("register_maybe:42").unwrap_err();
        assert_eq!(
            err,
            TokenError::UnknownAction {
                action: "register_maybe".to_string()
            }
        );
    }

    #[test]
    fn parse_rejects_non_numeric_identity() {
        let err = CallbackToken::parse("register_yes:bob").unwrap_err();
        assert!(matches!(err, TokenError::InvalidIdentity { .. }));
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(CallbackToken::parse("").is_err());
        assert!(CallbackToken::parse(":").is_err());
    }

    #[test]
    fn display_matches_encode() {
        let token = CallbackToken::new(ConfirmAction::Confirm, UserId::new(7));
        assert_eq!(token.to_string(), token.encode());
    }

    proptest! {
        #[test]
        fn round_trip_any_identity(raw in any::<i64>(), confirm in any::<bool>()) {
            let action = if confirm { ConfirmAction::Confirm } else { ConfirmAction::Decline };
            let token = CallbackToken::new(action, UserId::new(raw));
            let back = CallbackToken::parse(&token.encode()).expect("round trip");
            prop_assert_eq!(back, token);
        }
    }
}
