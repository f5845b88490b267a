//! # Application State
//!
//! Shared state for the Axum application: the bot core, the outbound
//! transport, and the database pool (when configured) for the readiness
//! probe.

use std::sync::Arc;

use sqlx::postgres::PgPool;

use herald_service::BotService;

use crate::transport::Outbound;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// The bot core.
    pub service: Arc<BotService>,
    /// Outbound reply transport.
    pub outbound: Arc<dyn Outbound>,
    /// Database pool; `None` when running on the in-memory store.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// Assemble the application state.
    pub fn new(
        service: Arc<BotService>,
        outbound: Arc<dyn Outbound>,
        db_pool: Option<PgPool>,
    ) -> Self {
        Self {
            service,
            outbound,
            db_pool,
        }
    }
}
