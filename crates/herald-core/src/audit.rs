//! # Admin Audit Actions
//!
//! Every admin-triggered operation produces exactly one audit record,
//! appended to the audit sink. Records are append-only and never read back
//! by the bot; the timestamp column is filled by the store.

use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// The fixed enumeration of auditable admin outcomes.
///
/// Wire names are snake_case for compatibility with the `admin_logs`
/// schema's `action` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    /// Count query succeeded.
    CountUsers,
    /// Count query failed at the store.
    CountUsersFailed,
    /// List query succeeded (including the empty-roster case).
    ListUsers,
    /// List query failed at the store.
    ListUsersFailed,
    /// Notify aborted before any delivery (validation or store failure).
    NotifyFailed,
    /// Notify invoked against an empty roster; nothing delivered.
    NotifyAttemptNoUsers,
    /// Broadcast completed (possibly with per-recipient failures).
    BroadcastMessage,
}

impl AdminAction {
    /// The canonical snake_case name stored in the audit log.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CountUsers => "count_users",
            Self::CountUsersFailed => "count_users_failed",
            Self::ListUsers => "list_users",
            Self::ListUsersFailed => "list_users_failed",
            Self::NotifyFailed => "notify_failed",
            Self::NotifyAttemptNoUsers => "notify_attempt_no_users",
            Self::BroadcastMessage => "broadcast_message",
        }
    }
}

impl std::fmt::Display for AdminAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One append-only record of an admin operation's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminActionRecord {
    /// The administrator who triggered the operation.
    pub admin_identity: UserId,
    /// What happened.
    pub action: AdminAction,
    /// Free-text outcome summary (counts, failure descriptions).
    pub details: String,
}

impl AdminActionRecord {
    /// Build a record for the given admin and outcome.
    pub fn new(admin_identity: UserId, action: AdminAction, details: impl Into<String>) -> Self {
        Self {
            admin_identity,
            action,
            details: details.into(),
        }
    }
}
