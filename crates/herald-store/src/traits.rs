//! # Persistence Trait Interfaces
//!
//! Abstract interfaces over the registrant store and the audit sink.
//! Implementations must be `Send + Sync` so they can be shared across
//! async tasks behind an `Arc`. Both traits are object-safe to support
//! runtime backend selection (memory vs. Postgres).

use async_trait::async_trait;

use herald_core::{AdminActionRecord, Registrant, UserId};

use crate::error::{SinkError, StoreError};

/// The registrant persistence collaborator.
///
/// Four operations, matching what the bot actually needs: existence check,
/// insert, count, list. The store is responsible for its own concurrency
/// control; `insert` must reject a duplicate identity deterministically via
/// [`StoreError::AlreadyRegistered`].
#[async_trait]
pub trait RegistrantStore: Send + Sync {
    /// Whether a registrant record exists for the identity.
    async fn exists(&self, identity: UserId) -> Result<bool, StoreError>;

    /// Insert a new registrant, returning the stored record.
    ///
    /// A duplicate identity yields [`StoreError::AlreadyRegistered`] — never
    /// a second row and never a generic failure.
    async fn insert(&self, registrant: &Registrant) -> Result<Registrant, StoreError>;

    /// Total number of registrants.
    async fn count(&self) -> Result<u64, StoreError>;

    /// All registrants, in stable insertion order.
    async fn list(&self) -> Result<Vec<Registrant>, StoreError>;

    /// Human-readable backend name for logs (e.g. "memory", "postgres").
    fn backend_name(&self) -> &'static str;
}

/// The append-only audit log collaborator.
///
/// No read path: the bot only ever appends. The record's timestamp is
/// assigned by the sink.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Append one admin action record.
    async fn append(&self, record: &AdminActionRecord) -> Result<(), SinkError>;
}
