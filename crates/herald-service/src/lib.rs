//! # herald-service — Registration Flow & Admin Protocol
//!
//! The bot's core. Everything the transport adapter routes lands on
//! [`BotService`], which exposes one handler per inbound event kind:
//!
//! | Event | Handler |
//! |-------|---------|
//! | Start trigger (`/start`) | [`BotService::handle_start`] |
//! | Confirmation button press | [`BotService::handle_confirmation_action`] |
//! | Admin command (`/count`, `/list`, `/notify`) | [`BotService::handle_admin_command`] |
//! | Help request (`/help`) | [`BotService::handle_help`] |
//! | Plain text | [`BotService::handle_plain_text`] |
//!
//! Every handler returns a [`ReplyPayload`](herald_core::ReplyPayload) for
//! the transport to deliver. Handlers never panic and never surface internal
//! error detail to the user: collaborator failures are matched exhaustively
//! and converted to generic transient-failure replies at the operation
//! boundary.
//!
//! ## Collaborators
//!
//! - The registrant store and audit sink come from `herald-store`.
//! - Broadcast delivery goes through the [`MessageSender`] trait, so the
//!   core stays independent of the wire transport.
//!
//! ## Audit
//!
//! Admin operations append exactly one audit record each. Appends are
//! fire-and-forget: a sink failure is logged operationally and never
//! affects the admin-facing reply.

pub mod admin;
pub mod broadcast;
pub mod registration;
pub mod replies;
pub mod sender;
pub mod service;

pub use admin::AdminCommand;
pub use broadcast::BroadcastOutcome;
pub use sender::{MessageSender, MockSender, SendError};
pub use service::BotService;
