//! # In-Memory Store and Sink
//!
//! In-process implementations used by the test suite and by deployments
//! running without a `DATABASE_URL`. Registrants are kept in insertion
//! order; audit records accumulate in a vector the tests can inspect.
//!
//! Both types support failure injection (`set_unavailable`) so callers can
//! exercise the transient-failure branches without a real outage.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use herald_core::{AdminActionRecord, Registrant, UserId};

use crate::error::{SinkError, StoreError};
use crate::traits::{AuditSink, RegistrantStore};

/// In-memory registrant store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    registrants: RwLock<Vec<Registrant>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle failure injection: while unavailable, every operation returns
    /// [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                reason: "injected outage".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RegistrantStore for MemoryStore {
    async fn exists(&self, identity: UserId) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self
            .registrants
            .read()
            .iter()
            .any(|r| r.identity == identity))
    }

    async fn insert(&self, registrant: &Registrant) -> Result<Registrant, StoreError> {
        self.check_available()?;
        let mut registrants = self.registrants.write();
        if registrants.iter().any(|r| r.identity == registrant.identity) {
            return Err(StoreError::AlreadyRegistered {
                identity: registrant.identity,
            });
        }
        registrants.push(registrant.clone());
        Ok(registrant.clone())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.check_available()?;
        Ok(self.registrants.read().len() as u64)
    }

    async fn list(&self) -> Result<Vec<Registrant>, StoreError> {
        self.check_available()?;
        Ok(self.registrants.read().clone())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// In-memory audit sink.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: RwLock<Vec<AdminActionRecord>>,
    failing: AtomicBool,
}

impl MemoryAuditSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle failure injection: while failing, appends return
    /// [`SinkError::Append`] (and record nothing).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of everything appended so far (test inspection).
    pub fn entries(&self) -> Vec<AdminActionRecord> {
        self.entries.read().clone()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn append(&self, record: &AdminActionRecord) -> Result<(), SinkError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SinkError::Append {
                reason: "injected outage".to_string(),
            });
        }
        self.entries.write().push(record.clone());
        Ok(())
    }
}
