//! # Reply Text Catalog
//!
//! Every user-facing string the bot produces, in one place. The wording
//! matches the original deployment so migrated users and the admin see
//! identical transcripts.

use herald_core::{PromptAction, Registrant, ReplyPayload, UserProfile};
use herald_state::{CallbackToken, ConfirmAction};

use crate::broadcast::BroadcastOutcome;

/// Generic transient-failure reply; never carries internal detail.
pub fn transient_failure() -> ReplyPayload {
    ReplyPayload::text("Something went wrong, please try again later.")
}

/// Acknowledgment for a user who is already registered.
pub fn already_registered() -> ReplyPayload {
    ReplyPayload::text("You’re already registered. I’ll notify you when the app is live.")
}

/// The confirmation prompt: identity summary plus confirm/decline buttons,
/// and a contact button when an admin handle is configured.
pub fn registration_prompt(profile: &UserProfile, admin_contact: Option<&str>) -> ReplyPayload {
    let handle_line = match profile.handle.as_deref() {
        Some(handle) => format!("• Your Username: `@{handle}`\n"),
        None => {
            "• Your Username: `Not available` (You can set one in Telegram settings!)\n".to_string()
        }
    };

    let text = format!(
        "Hello {salutation}! I see you're not yet registered.\n\n\
         I'll collect the following information to keep you updated:\n\
         • Your Telegram ID: `{id}`\n\
         {handle_line}\
         • Your First Name: `{first_name}`\n\n\
         Would you like to register for updates about the upcoming launch?",
        salutation = profile.salutation(),
        id = profile.id,
        first_name = profile.first_name.as_deref().unwrap_or("Not provided"),
    );

    let mut actions = vec![
        PromptAction::callback(
            "✅ Yes, register me!",
            CallbackToken::new(ConfirmAction::Confirm, profile.id).encode(),
        ),
        PromptAction::callback(
            "❌ No, thanks.",
            CallbackToken::new(ConfirmAction::Decline, profile.id).encode(),
        ),
    ];
    if let Some(handle) = admin_contact {
        actions.push(PromptAction::url(
            "❓ Contact Admin",
            format!("https://t.me/{handle}"),
        ));
    }

    ReplyPayload::markdown(text).with_actions(actions)
}

/// Reply when a confirmation button is pressed by someone other than the
/// prompted user.
pub fn not_for_you() -> ReplyPayload {
    ReplyPayload::text("This registration prompt is not for you.")
}

/// Success acknowledgment after the registrant record is stored.
pub fn confirm_success(salutation: &str) -> ReplyPayload {
    ReplyPayload::markdown(format!(
        "🎉 Great! Thanks for registering, {salutation}! I’ll notify you when the app is ready."
    ))
}

/// Failure reply when the insert itself fails.
pub fn registration_failure() -> ReplyPayload {
    ReplyPayload::text("Something went wrong during registration, please try again later.")
}

/// Acknowledgment after a decline, inviting a later restart.
pub fn decline_ack() -> ReplyPayload {
    ReplyPayload::text("No problem! You can type /start again anytime if you change your mind.")
}

/// Reply to any non-admin invoking an admin command.
pub fn unauthorized() -> ReplyPayload {
    ReplyPayload::text("Unauthorized access. This command is for admins only.")
}

/// Count result.
pub fn count_reply(count: u64) -> ReplyPayload {
    ReplyPayload::text(format!("Currently, {count} users are registered."))
}

/// Count store-failure reply.
pub fn count_failure() -> ReplyPayload {
    ReplyPayload::text("Something went wrong while fetching user count, please try again later.")
}

/// List store-failure reply.
pub fn list_failure() -> ReplyPayload {
    ReplyPayload::text("Something went wrong while fetching the user list, please try again later.")
}

/// Empty-roster reply shared by list and the pre-broadcast check wording
/// for list.
pub fn no_users() -> ReplyPayload {
    ReplyPayload::text("No users are currently registered.")
}

/// Non-empty list rendering: one line per registrant, identity plus an
/// optional `(@handle)` suffix.
pub fn list_reply(registrants: &[Registrant]) -> ReplyPayload {
    let lines: Vec<String> = registrants
        .iter()
        .map(|r| match r.handle.as_deref() {
            Some(handle) => format!("- `{}` (@{handle})", r.identity),
            None => format!("- `{}`", r.identity),
        })
        .collect();
    ReplyPayload::markdown(format!("Registered Users:\n{}", lines.join("\n")))
}

/// Usage reply for `/notify` with no message text.
pub fn notify_usage() -> ReplyPayload {
    ReplyPayload::markdown(
        "Please provide a message to send. Example: `/notify The app is now live!`",
    )
}

/// Notify-specific store-failure reply.
pub fn notify_list_failure() -> ReplyPayload {
    ReplyPayload::text(
        "Something went wrong while fetching the user list for notification, please try again later.",
    )
}

/// Empty-roster reply for `/notify`.
pub fn no_users_to_notify() -> ReplyPayload {
    ReplyPayload::text("No users are currently registered to notify.")
}

/// Broadcast completion summary.
pub fn broadcast_summary(outcome: &BroadcastOutcome) -> ReplyPayload {
    ReplyPayload::text(format!(
        "Broadcast complete! Sent to {} users. Failed for {} users.",
        outcome.sent_count, outcome.failed_count
    ))
}

/// Static redirect for plain (non-command) text.
pub fn plain_text_redirect() -> ReplyPayload {
    ReplyPayload::text("I'm a registration bot! Please use commands like /start or /help.")
}

/// Help text; admins get the extra command section.
pub fn help(is_admin: bool) -> ReplyPayload {
    let mut text = String::from(
        "Welcome to the Herald registration bot!\n\n\
         Use /start to register for updates on the upcoming launch.\n",
    );
    if is_admin {
        text.push_str(
            "\n--- Admin Commands ---\n\
             /count - Get the total number of registered users.\n\
             /list - Get a list of all registered usernames and IDs.\n\
             /notify <message> - Send a broadcast message to all registered users. \
             Example: `/notify The app is live!`\n",
        );
    }
    ReplyPayload::text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::UserId;

    fn profile(id: i64, handle: Option<&str>, first: Option<&str>) -> UserProfile {
        UserProfile::new(id, handle.map(String::from), first.map(String::from))
    }

    #[test]
    fn prompt_carries_both_tagged_actions() {
        let reply = registration_prompt(&profile(42, Some("ada"), Some("Ada")), None);
        assert!(reply.markdown);
        assert_eq!(reply.actions.len(), 2);
        assert_eq!(
            reply.actions[0],
            PromptAction::callback("✅ Yes, register me!", "register_yes:42")
        );
        assert_eq!(
            reply.actions[1],
            PromptAction::callback("❌ No, thanks.", "register_no:42")
        );
        assert!(reply.text.contains("Hello Ada!"));
        assert!(reply.text.contains("`42`"));
        assert!(reply.text.contains("`@ada`"));
    }

    #[test]
    fn prompt_marks_missing_handle_unavailable() {
        let reply = registration_prompt(&profile(42, None, None), None);
        assert!(reply.text.contains("`Not available`"));
        assert!(reply.text.contains("Hello there!"));
        assert!(reply.text.contains("`Not provided`"));
    }

    #[test]
    fn prompt_adds_contact_button_when_configured() {
        let reply = registration_prompt(&profile(42, None, None), Some("helpdesk"));
        assert_eq!(reply.actions.len(), 3);
        assert_eq!(
            reply.actions[2],
            PromptAction::url("❓ Contact Admin", "https://t.me/helpdesk")
        );
    }

    #[test]
    fn list_reply_renders_handles_when_present() {
        let registrants = vec![
            Registrant {
                identity: UserId::new(1),
                handle: Some("one".into()),
                display_name: "One".into(),
            },
            Registrant {
                identity: UserId::new(2),
                handle: None,
                display_name: "Two".into(),
            },
        ];
        let reply = list_reply(&registrants);
        assert_eq!(
            reply.text,
            "Registered Users:\n- `1` (@one)\n- `2`"
        );
        assert!(reply.markdown);
    }

    #[test]
    fn count_reply_interpolates() {
        assert_eq!(
            count_reply(3).text,
            "Currently, 3 users are registered."
        );
    }

    #[test]
    fn broadcast_summary_reports_both_counts() {
        let outcome = BroadcastOutcome {
            sent_count: 2,
            failed_count: 1,
            failed_identities: vec![UserId::new(2)],
        };
        assert_eq!(
            broadcast_summary(&outcome).text,
            "Broadcast complete! Sent to 2 users. Failed for 1 users."
        );
    }

    #[test]
    fn help_hides_admin_section_for_users() {
        assert!(!help(false).text.contains("Admin Commands"));
        let admin_help = help(true).text;
        assert!(admin_help.contains("/count"));
        assert!(admin_help.contains("/list"));
        assert!(admin_help.contains("/notify"));
    }
}
