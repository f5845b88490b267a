//! # herald-state — Registration Prompt State Machine
//!
//! Implements the registration prompt lifecycle using the typestate pattern.
//! Each state is a distinct Rust type, and transitions are methods that
//! consume the current state and produce the next. Invalid transitions are
//! compile errors, not runtime checks.
//!
//! ## Lifecycle
//!
//! ```text
//! Prompt<Issued> ──accept(actor)──▶ Prompt<Accepted>
//!       │
//!       └────────decline(actor)──▶ Prompt<Declined>
//! ```
//!
//! Both transitions enforce the **confirmation-ownership check**: the acting
//! identity must equal the identity the prompt was issued for, otherwise the
//! transition fails with [`OwnershipError`] and the prompt is returned
//! unchanged. This prevents a third party who sees or forwards the prompt
//! from registering (or declining for) another user.
//!
//! `Accepted` and `Declined` are terminal for that prompt instance — there
//! is no method back to `Issued`. A declined user re-enters the flow only by
//! triggering a fresh start event; the machine keeps no persisted memory of
//! a decline.
//!
//! ## Callback Tokens
//!
//! The prompt is ephemeral: it is not persisted anywhere. Its entire state
//! travels inside the outbound message's callback tokens
//! (`register_yes:{id}` / `register_no:{id}`), decoded by
//! [`token::CallbackToken::parse`] when the user presses a button.

pub mod prompt;
pub mod token;

pub use prompt::{Accepted, Declined, Issued, OwnershipError, Prompt, PromptState};
pub use token::{CallbackToken, ConfirmAction, TokenError};
