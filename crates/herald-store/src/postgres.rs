//! # Postgres Store and Sink
//!
//! SQLx-backed implementations over the `registrations` and `admin_logs`
//! tables. Queries are runtime-bound (`sqlx::query` / `query_as`) with
//! `FromRow` row structs; embedded migrations run at connect time.
//!
//! The `registrations` primary key enforces the at-most-one-record-per-
//! identity invariant. A duplicate insert loses at the constraint and is
//! surfaced as [`StoreError::AlreadyRegistered`] (SQLSTATE 23505), which
//! the service layer treats as the idempotent "already registered" path.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use herald_core::{AdminActionRecord, Registrant, UserId};

use crate::error::{SinkError, StoreError};
use crate::traits::{AuditSink, RegistrantStore};

/// SQLSTATE for a unique-constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Connect to Postgres and run embedded migrations.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

/// Map a SQLx error to the store taxonomy.
///
/// Connectivity-class failures become `Unavailable`; everything else is a
/// `Query` failure. Unique violations are handled at the insert call site
/// where the identity is in scope.
fn store_error(context: &str, e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable {
                reason: format!("{context}: {e}"),
            }
        }
        other => StoreError::Query {
            reason: format!("{context}: {other}"),
        },
    }
}

/// Postgres registrant store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an already-connected pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct RegistrantRow {
    telegram_id: i64,
    username: Option<String>,
    first_name: String,
}

impl RegistrantRow {
    fn into_registrant(self) -> Registrant {
        Registrant {
            identity: UserId::new(self.telegram_id),
            handle: self.username,
            display_name: self.first_name,
        }
    }
}

#[async_trait]
impl RegistrantStore for PgStore {
    async fn exists(&self, identity: UserId) -> Result<bool, StoreError> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT telegram_id FROM registrations WHERE telegram_id = $1")
                .bind(identity.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| store_error("exists", e))?;
        Ok(found.is_some())
    }

    async fn insert(&self, registrant: &Registrant) -> Result<Registrant, StoreError> {
        let row = sqlx::query_as::<_, RegistrantRow>(
            "INSERT INTO registrations (telegram_id, username, first_name)
             VALUES ($1, $2, $3)
             RETURNING telegram_id, username, first_name",
        )
        .bind(registrant.identity.as_i64())
        .bind(&registrant.handle)
        .bind(&registrant.display_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                StoreError::AlreadyRegistered {
                    identity: registrant.identity,
                }
            }
            _ => store_error("insert", e),
        })?;

        Ok(row.into_registrant())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registrations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("count", e))?;
        Ok(count.max(0) as u64)
    }

    async fn list(&self) -> Result<Vec<Registrant>, StoreError> {
        let rows = sqlx::query_as::<_, RegistrantRow>(
            "SELECT telegram_id, username, first_name
             FROM registrations ORDER BY created_at, telegram_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("list", e))?;

        Ok(rows.into_iter().map(RegistrantRow::into_registrant).collect())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

/// Postgres audit sink over the `admin_logs` table.
#[derive(Debug, Clone)]
pub struct PgAuditSink {
    pool: PgPool,
}

impl PgAuditSink {
    /// Wrap an already-connected pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditSink for PgAuditSink {
    async fn append(&self, record: &AdminActionRecord) -> Result<(), SinkError> {
        sqlx::query(
            "INSERT INTO admin_logs (admin_telegram_id, action, details)
             VALUES ($1, $2, $3)",
        )
        .bind(record.admin_identity.as_i64())
        .bind(record.action.as_str())
        .bind(&record.details)
        .execute(&self.pool)
        .await
        .map_err(|e| SinkError::Append {
            reason: e.to_string(),
        })?;

        Ok(())
    }
}
