//! # User Identity Newtype
//!
//! Newtype wrapper for the messaging platform's integer user identifier.
//! Prevents accidental confusion between user identities and other integer
//! values (chat identifiers, message identifiers, counts).

use serde::{Deserialize, Serialize};

/// Unique identifier for a platform user.
///
/// The platform assigns these; Herald never generates one. The same value
/// identifies the user across registration, confirmation callbacks, admin
/// commands, and broadcast delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Wrap a raw platform identifier.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw identifier value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Parse an identifier from its decimal string form.
    ///
    /// Used by the callback token codec; rejects anything that is not a
    /// well-formed signed 64-bit decimal integer.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<i64>().ok().map(Self)
    }
}

impl From<i64> for UserId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
