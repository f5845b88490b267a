//! # herald-api — Webhook Transport Adapter
//!
//! The transport layer between the messaging platform and the bot core.
//! Inbound updates arrive on the webhook endpoint, get deserialized into
//! the domain model, and are routed to `herald-service`; replies go back
//! out through the Bot API client.
//!
//! ## API Surface
//!
//! | Prefix | Module | Purpose |
//! |--------|--------|---------|
//! | `POST /api/bot` | [`routes`] | Webhook: process one platform update |
//! | `GET /api/bot`  | [`routes`] | Informational payload |
//! | `/health/*`     | here       | Liveness/readiness probes (unauthenticated) |
//!
//! ## Wiring
//!
//! The `herald` binary builds an [`AppState`] from the configuration
//! (Postgres or in-memory store, Bot API client) and serves [`app`].

pub mod client;
pub mod routes;
pub mod state;
pub mod telegram;
pub mod transport;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use client::{ClientError, TelegramClient, TelegramConfig};
pub use state::AppState;
pub use transport::{Outbound, RecordingOutbound};

/// Assemble the full application router.
///
/// Health probes are mounted alongside the webhook; everything is wrapped
/// in a `TraceLayer` for request-level logging.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .merge(routes::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — verifies the database is reachable when configured.
///
/// In-memory deployments are always ready.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::warn!(error = %e, "database health check failed");
            return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
        }
    }
    (StatusCode::OK, "ready").into_response()
}
