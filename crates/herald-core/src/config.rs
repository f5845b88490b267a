//! # Bot Configuration
//!
//! Explicitly constructed, immutable configuration passed into the bot at
//! startup. Business logic never performs ambient environment lookups; the
//! binary reads the environment once and builds this value.

use crate::identity::UserId;

/// Immutable bot configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// The single administrator's identity. Only this user may invoke
    /// count/list/notify.
    pub admin_id: UserId,
    /// Optional admin username (no `@`) used to render a "Contact Admin"
    /// button on the registration prompt.
    pub admin_contact: Option<String>,
}

impl BotConfig {
    /// Build a configuration with no admin contact handle.
    pub fn new(admin_id: impl Into<UserId>) -> Self {
        Self {
            admin_id: admin_id.into(),
            admin_contact: None,
        }
    }

    /// Set the admin contact handle.
    pub fn with_admin_contact(mut self, handle: impl Into<String>) -> Self {
        self.admin_contact = Some(handle.into());
        self
    }

    /// Whether the given identity is the configured administrator.
    pub fn is_admin(&self, id: UserId) -> bool {
        self.admin_id == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_gate_matches_exactly() {
        let config = BotConfig::new(1000);
        assert!(config.is_admin(UserId::new(1000)));
        assert!(!config.is_admin(UserId::new(1001)));
    }

    #[test]
    fn admin_contact_is_optional() {
        assert!(BotConfig::new(1).admin_contact.is_none());
        let config = BotConfig::new(1).with_admin_contact("helpdesk");
        assert_eq!(config.admin_contact.as_deref(), Some("helpdesk"));
    }
}
