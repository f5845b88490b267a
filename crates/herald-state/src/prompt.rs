//! # Prompt Typestate Machine
//!
//! A confirmation prompt, parameterized by its lifecycle state. Each state
//! is a distinct type — `Prompt<Issued>` has `accept()` and `decline()`;
//! `Prompt<Accepted>` and `Prompt<Declined>` have neither, so acting twice
//! on the same prompt instance is a compile error.
//!
//! Transitions are fallible: they enforce the ownership invariant that only
//! the prompted user may act on the prompt. A mismatched actor gets
//! [`OwnershipError`] and the prompt back, unchanged.

use std::marker::PhantomData;

use thiserror::Error;

use herald_core::UserId;

// ─── State Types ─────────────────────────────────────────────────────

/// Prompt state: sent to the user, awaiting a button press.
#[derive(Debug, Clone, Copy)]
pub struct Issued;

/// Prompt state: the prompted user confirmed (terminal).
#[derive(Debug, Clone, Copy)]
pub struct Accepted;

/// Prompt state: the prompted user declined (terminal).
#[derive(Debug, Clone, Copy)]
pub struct Declined;

// ─── Sealed Trait ────────────────────────────────────────────────────

mod private {
    pub trait Sealed {}
    impl Sealed for super::Issued {}
    impl Sealed for super::Accepted {}
    impl Sealed for super::Declined {}
}

/// Marker trait for the three prompt states.
///
/// Sealed — external crates cannot add states.
pub trait PromptState: private::Sealed + std::fmt::Debug {
    /// Canonical state name for logging.
    fn name() -> &'static str;

    /// Whether this state is terminal for the prompt instance.
    fn is_terminal() -> bool {
        true
    }
}

impl PromptState for Issued {
    fn name() -> &'static str {
        "ISSUED"
    }
    fn is_terminal() -> bool {
        false
    }
}
impl PromptState for Accepted {
    fn name() -> &'static str {
        "ACCEPTED"
    }
}
impl PromptState for Declined {
    fn name() -> &'static str {
        "DECLINED"
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// The acting user is not the user the prompt was issued for.
///
/// An expected control outcome, not a fault: the caller replies "not for
/// you" and performs no state change. The prompt is handed back inside the
/// error so it stays actionable by its rightful owner.
#[derive(Debug, Error)]
#[error("confirmation prompt issued for {issued_for} acted on by {actor}")]
pub struct OwnershipError {
    /// The user who pressed the button.
    pub actor: UserId,
    /// The user the prompt belongs to.
    pub issued_for: UserId,
    /// The untouched prompt.
    pub prompt: Prompt<Issued>,
}

// ─── The Prompt ──────────────────────────────────────────────────────

/// A confirmation prompt bound to one identity, parameterized by state.
#[derive(Debug, Clone, Copy)]
pub struct Prompt<S: PromptState> {
    issued_for: UserId,
    _state: PhantomData<S>,
}

impl<S: PromptState> Prompt<S> {
    /// The identity this prompt was issued for.
    pub fn issued_for(&self) -> UserId {
        self.issued_for
    }

    /// Canonical state name.
    pub fn state_name(&self) -> &'static str {
        S::name()
    }

    /// Whether the prompt can still be acted on.
    pub fn is_terminal(&self) -> bool {
        S::is_terminal()
    }
}

impl Prompt<Issued> {
    /// Issue a prompt for the given user.
    pub fn issue(issued_for: UserId) -> Self {
        Self {
            issued_for,
            _state: PhantomData,
        }
    }

    /// The prompted user confirms.
    ///
    /// Fails with [`OwnershipError`] when `actor` is not the prompted user.
    pub fn accept(self, actor: UserId) -> Result<Prompt<Accepted>, OwnershipError> {
        self.check_owner(actor)?;
        Ok(Prompt {
            issued_for: self.issued_for,
            _state: PhantomData,
        })
    }

    /// The prompted user declines.
    ///
    /// Fails with [`OwnershipError`] when `actor` is not the prompted user.
    pub fn decline(self, actor: UserId) -> Result<Prompt<Declined>, OwnershipError> {
        self.check_owner(actor)?;
        Ok(Prompt {
            issued_for: self.issued_for,
            _state: PhantomData,
        })
    }

    fn check_owner(self, actor: UserId) -> Result<Self, OwnershipError> {
        if actor != self.issued_for {
            return Err(OwnershipError {
                actor,
                issued_for: self.issued_for,
                prompt: self,
            });
        }
        Ok(self)
    }
}
