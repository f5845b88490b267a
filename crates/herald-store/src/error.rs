//! # Store and Sink Errors
//!
//! Collaborator failures are values, not raised faults: every store
//! operation returns `Result<_, StoreError>` so the state machine's
//! branches are exhaustive matches rather than catch blocks.

use thiserror::Error;

use herald_core::UserId;

/// Errors from the registrant store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store backend is unreachable (connection refused, pool timeout).
    #[error("registrant store unavailable: {reason}")]
    Unavailable {
        /// Human-readable description of the outage.
        reason: String,
    },

    /// A query was executed but failed.
    #[error("registrant store query failed: {reason}")]
    Query {
        /// Description of the failure.
        reason: String,
    },

    /// Insert rejected by the uniqueness constraint — the identity is
    /// already registered. Callers treat this as the idempotent
    /// "already registered" outcome, not a failure.
    #[error("identity {identity} is already registered")]
    AlreadyRegistered {
        /// The identity that already has a record.
        identity: UserId,
    },
}

/// Error appending to the audit sink.
///
/// Absorbed by callers: the triggering operation's reply is sent regardless,
/// and the failure goes to the operational log only.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The append did not complete.
    #[error("audit append failed: {reason}")]
    Append {
        /// Description of the failure.
        reason: String,
    },
}
