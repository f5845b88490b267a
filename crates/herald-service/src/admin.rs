//! # Admin Command Protocol
//!
//! The three admin operations, each behind the authorization gate and each
//! producing exactly one audit record on every path past the gate. Store
//! failures are matched exhaustively and converted to generic replies at
//! the operation boundary — the admin never sees internal error detail.

use std::sync::Arc;

use herald_core::{AdminAction, ReplyPayload, UserId, UserProfile};

use crate::broadcast;
use crate::replies;
use crate::service::BotService;

/// A parsed admin command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    /// `/count` — total registrants.
    Count,
    /// `/list` — roster dump.
    List,
    /// `/notify <message>` — broadcast to all registrants.
    Notify {
        /// The broadcast payload, possibly empty (validated here, not by
        /// the parser).
        message: String,
    },
}

impl BotService {
    /// Handle an admin command.
    ///
    /// The gate runs first: a non-admin actor gets the unauthorized reply
    /// with zero audit entries and zero store access.
    pub async fn handle_admin_command(
        &self,
        actor: &UserProfile,
        command: AdminCommand,
    ) -> ReplyPayload {
        if !self.config.is_admin(actor.id) {
            tracing::warn!(user_id = %actor.id, ?command, "unauthorized admin command");
            return replies::unauthorized();
        }

        tracing::info!(admin_id = %actor.id, ?command, "admin command received");
        match command {
            AdminCommand::Count => self.count_users(actor.id).await,
            AdminCommand::List => self.list_users(actor.id).await,
            AdminCommand::Notify { message } => self.notify_users(actor.id, &message).await,
        }
    }

    async fn count_users(&self, admin: UserId) -> ReplyPayload {
        match self.store.count().await {
            Err(e) => {
                tracing::error!(error = %e, "count query failed");
                self.record_audit(
                    admin,
                    AdminAction::CountUsersFailed,
                    "Database error fetching count.",
                )
                .await;
                replies::count_failure()
            }
            Ok(count) => {
                self.record_audit(
                    admin,
                    AdminAction::CountUsers,
                    format!("Returned count: {count}"),
                )
                .await;
                replies::count_reply(count)
            }
        }
    }

    async fn list_users(&self, admin: UserId) -> ReplyPayload {
        match self.store.list().await {
            Err(e) => {
                tracing::error!(error = %e, "list query failed");
                self.record_audit(
                    admin,
                    AdminAction::ListUsersFailed,
                    "Database error fetching list.",
                )
                .await;
                replies::list_failure()
            }
            Ok(registrants) if registrants.is_empty() => {
                self.record_audit(admin, AdminAction::ListUsers, "No registered users.")
                    .await;
                replies::no_users()
            }
            Ok(registrants) => {
                self.record_audit(
                    admin,
                    AdminAction::ListUsers,
                    format!("Returned {} users.", registrants.len()),
                )
                .await;
                replies::list_reply(&registrants)
            }
        }
    }

    async fn notify_users(&self, admin: UserId, message: &str) -> ReplyPayload {
        let text = message.trim();
        if text.is_empty() {
            tracing::warn!("notify command without message text");
            self.record_audit(admin, AdminAction::NotifyFailed, "No message text provided.")
                .await;
            return replies::notify_usage();
        }

        let registrants = match self.store.list().await {
            Err(e) => {
                tracing::error!(error = %e, "list query failed for broadcast");
                self.record_audit(
                    admin,
                    AdminAction::NotifyFailed,
                    "Database error fetching user list for broadcast.",
                )
                .await;
                return replies::notify_list_failure();
            }
            Ok(registrants) => registrants,
        };

        if registrants.is_empty() {
            self.record_audit(
                admin,
                AdminAction::NotifyAttemptNoUsers,
                "No registered users to send broadcast to.",
            )
            .await;
            return replies::no_users_to_notify();
        }

        let outcome = broadcast::fan_out(Arc::clone(&self.sender), &registrants, text).await;
        tracing::info!(
            sent = outcome.sent_count,
            failed = outcome.failed_count,
            "broadcast complete"
        );
        self.record_audit(
            admin,
            AdminAction::BroadcastMessage,
            outcome.audit_details(text),
        )
        .await;
        replies::broadcast_summary(&outcome)
    }
}
