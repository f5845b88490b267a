//! # Bot Service
//!
//! The service struct wiring the configuration and collaborators together.
//! The registration handlers live in `registration.rs`, the admin protocol
//! in `admin.rs`; this module holds construction and the two stateless
//! handlers (plain text, help).

use std::sync::Arc;

use herald_core::{AdminAction, AdminActionRecord, BotConfig, ReplyPayload, UserId, UserProfile};
use herald_store::{AuditSink, RegistrantStore};

use crate::replies;
use crate::sender::MessageSender;

/// The Herald bot core. One instance serves all inbound events; there is no
/// cross-event shared mutable state here — the store is the only shared,
/// mutating resource.
pub struct BotService {
    pub(crate) config: BotConfig,
    pub(crate) store: Arc<dyn RegistrantStore>,
    pub(crate) audit: Arc<dyn AuditSink>,
    pub(crate) sender: Arc<dyn MessageSender>,
}

impl BotService {
    /// Wire up the service.
    pub fn new(
        config: BotConfig,
        store: Arc<dyn RegistrantStore>,
        audit: Arc<dyn AuditSink>,
        sender: Arc<dyn MessageSender>,
    ) -> Self {
        tracing::info!(
            admin_id = %config.admin_id,
            store = store.backend_name(),
            "bot service initialized"
        );
        Self {
            config,
            store,
            audit,
            sender,
        }
    }

    /// The immutable configuration.
    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Static redirect for plain (non-command) text.
    pub async fn handle_plain_text(&self, profile: &UserProfile) -> ReplyPayload {
        tracing::info!(user_id = %profile.id, "non-command message received");
        replies::plain_text_redirect()
    }

    /// Help text; the admin sees the extra command section.
    pub async fn handle_help(&self, profile: &UserProfile) -> ReplyPayload {
        tracing::info!(user_id = %profile.id, "help command received");
        replies::help(self.config.is_admin(profile.id))
    }

    /// Append an audit record, absorbing sink failures.
    ///
    /// The triggering operation's reply has already been decided; a failed
    /// append goes to the operational log only.
    pub(crate) async fn record_audit(
        &self,
        admin: UserId,
        action: AdminAction,
        details: impl Into<String>,
    ) {
        let record = AdminActionRecord::new(admin, action, details);
        if let Err(e) = self.audit.append(&record).await {
            tracing::warn!(
                error = %e,
                action = %record.action,
                admin_id = %record.admin_identity,
                "failed to append audit record"
            );
        }
    }
}
