//! # herald-core — Foundational Types for the Herald Bot
//!
//! This crate is the bedrock of the Herald workspace. It defines the domain
//! types every other crate consumes: user identities, registrant records,
//! admin audit actions, reply payloads, and the bot configuration. It depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `UserId` is a newtype over
//!    the platform's integer identifier — no bare `i64` values cross a seam.
//!
//! 2. **Typed records, not open-ended mappings.** Registrants, audit records,
//!    and reply payloads are explicit structs with required vs. optional
//!    fields stated in the type.
//!
//! 3. **Explicit, immutable configuration.** `BotConfig` is constructed once
//!    at startup and passed in; business logic never reads the environment.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `herald-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`; wire-facing types implement
//!   `Serialize`/`Deserialize`.

pub mod audit;
pub mod config;
pub mod identity;
pub mod registrant;
pub mod reply;

pub use audit::{AdminAction, AdminActionRecord};
pub use config::BotConfig;
pub use identity::UserId;
pub use registrant::{Registrant, UserProfile};
pub use reply::{PromptAction, ReplyPayload};
