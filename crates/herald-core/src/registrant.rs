//! # Registrant and Profile Records
//!
//! `UserProfile` is the acting user as seen on an inbound event — identity
//! plus whatever optional profile fields the platform attached.
//! `Registrant` is the persisted record created on successful confirmation.
//!
//! At most one `Registrant` exists per identity; the store's uniqueness
//! constraint enforces it. Registrant records are never mutated or deleted.

use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// Placeholder display name used when the platform supplies no first name.
pub const DISPLAY_NAME_PLACEHOLDER: &str = "N/A";

/// The acting user on an inbound event.
///
/// `handle` is the platform username without the `@` prefix; users are not
/// required to set one. `first_name` is likewise optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Platform-assigned identity.
    pub id: UserId,
    /// Platform username, if the user has set one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    /// Human first name, if supplied by the platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
}

impl UserProfile {
    /// Construct a profile from raw wire values.
    pub fn new(id: impl Into<UserId>, handle: Option<String>, first_name: Option<String>) -> Self {
        Self {
            id: id.into(),
            handle,
            first_name,
        }
    }

    /// The name used to address this user in replies.
    ///
    /// Falls back to `"there"` for users with no first name, matching the
    /// greeting register of the prompt text.
    pub fn salutation(&self) -> &str {
        self.first_name.as_deref().unwrap_or("there")
    }
}

/// A user who completed the confirmation flow and is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registrant {
    /// Immutable identity; the store's primary key.
    pub identity: UserId,
    /// Platform username at confirmation time, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    /// Display name at confirmation time; never empty — defaults to
    /// [`DISPLAY_NAME_PLACEHOLDER`] when the profile carried no first name.
    pub display_name: String,
}

impl Registrant {
    /// Build the registrant record for a confirming user.
    ///
    /// Captures the acting user's *current* identity, handle, and name —
    /// not the values from when the prompt was issued.
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            identity: profile.id,
            handle: profile.handle.clone(),
            display_name: profile
                .first_name
                .clone()
                .unwrap_or_else(|| DISPLAY_NAME_PLACEHOLDER.to_string()),
        }
    }
}
