//! # herald-store — Registrant Store & Audit Sink
//!
//! Persistence interfaces for the Herald bot, and their two implementations.
//!
//! ## Interfaces
//!
//! - [`RegistrantStore`] — existence check, insert, count, list. The only
//!   shared mutable resource in the system; it owns its concurrency control.
//! - [`AuditSink`] — append-only record of admin actions. Fire-and-forget
//!   from the caller's perspective: append failures must never become
//!   operation failures.
//!
//! Both traits are object-safe async traits so the service layer can hold
//! `Arc<dyn RegistrantStore>` / `Arc<dyn AuditSink>` and swap the backend
//! at wiring time.
//!
//! ## Implementations
//!
//! - [`MemoryStore`] / [`MemoryAuditSink`] — in-process, used by tests and
//!   by deployments without a `DATABASE_URL`. Supports failure injection
//!   for exercising error paths.
//! - [`PgStore`] / [`PgAuditSink`] — Postgres over SQLx. The
//!   `registrations` primary key is the uniqueness guarantee behind
//!   idempotent registration: a duplicate insert surfaces as
//!   [`StoreError::AlreadyRegistered`], which callers treat as the
//!   "already registered" path rather than a failure.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod traits;

pub use error::{SinkError, StoreError};
pub use memory::{MemoryAuditSink, MemoryStore};
pub use postgres::{connect, PgAuditSink, PgStore};
pub use traits::{AuditSink, RegistrantStore};
