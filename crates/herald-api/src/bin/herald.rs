//! # herald server entry point
//!
//! Parses configuration from flags and environment variables, wires the
//! store/sink/client/service stack, and serves the webhook.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use herald_api::{AppState, TelegramClient, TelegramConfig};
use herald_core::BotConfig;
use herald_service::BotService;
use herald_store::{
    AuditSink, MemoryAuditSink, MemoryStore, PgAuditSink, PgStore, RegistrantStore,
};

/// Herald — registration bot for the upcoming launch.
///
/// Greets new users, captures opt-in consent, persists registrants, and
/// gives the administrator count/list/broadcast commands.
#[derive(Parser, Debug)]
#[command(name = "herald", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Address to bind the webhook server on.
    #[arg(long, default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// Bot API token.
    #[arg(long, env = "HERALD_BOT_TOKEN", hide_env_values = true)]
    bot_token: String,

    /// The administrator's user identifier.
    #[arg(long, env = "HERALD_ADMIN_ID")]
    admin_id: i64,

    /// Admin username (no @) for the prompt's contact button.
    #[arg(long, env = "HERALD_ADMIN_CONTACT")]
    admin_contact: Option<String>,

    /// Postgres connection URL; omit to run on the in-memory store.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut bot_config = BotConfig::new(cli.admin_id);
    if let Some(contact) = cli.admin_contact {
        bot_config = bot_config.with_admin_contact(contact);
    }

    let (store, audit, db_pool): (Arc<dyn RegistrantStore>, Arc<dyn AuditSink>, _) =
        match cli.database_url {
            Some(url) => {
                let pool = herald_store::connect(&url)
                    .await
                    .context("connecting to Postgres")?;
                (
                    Arc::new(PgStore::new(pool.clone())),
                    Arc::new(PgAuditSink::new(pool.clone())),
                    Some(pool),
                )
            }
            None => {
                tracing::warn!(
                    "DATABASE_URL not set — running on the in-memory store. \
                     Registrations will not survive restarts."
                );
                (
                    Arc::new(MemoryStore::new()),
                    Arc::new(MemoryAuditSink::new()),
                    None,
                )
            }
        };

    let client = Arc::new(
        TelegramClient::new(TelegramConfig::new(cli.bot_token))
            .context("building Bot API client")?,
    );

    let service = Arc::new(BotService::new(
        bot_config,
        store,
        audit,
        client.clone(),
    ));
    let state = AppState::new(service, client, db_pool);

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("binding {}", cli.bind))?;
    tracing::info!(addr = %cli.bind, "herald listening");

    axum::serve(listener, herald_api::app(state))
        .await
        .context("server error")?;

    Ok(())
}
