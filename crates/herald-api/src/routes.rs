//! # Webhook Routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/api/bot` | `webhook` — process one platform update |
//! | `GET`  | `/api/bot` | `webhook_info` — informational payload |
//!
//! The webhook always acknowledges with 200 once the update body parses:
//! the platform redelivers non-2xx updates, and redelivering an update
//! whose side effects already ran would double-process it. Outbound
//! delivery failures are logged, not surfaced.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use herald_service::AdminCommand;
use herald_state::CallbackToken;

use crate::state::AppState;
use crate::telegram::{CallbackQuery, Message, Update};

/// Build the webhook router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/bot", post(webhook).get(webhook_info))
}

/// GET /api/bot — informational payload for probes and humans.
async fn webhook_info() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "This is the Herald webhook endpoint. Send POST requests with platform updates."
    }))
}

/// POST /api/bot — process one update and acknowledge.
async fn webhook(State(state): State<AppState>, Json(update): Json<Update>) -> impl IntoResponse {
    tracing::debug!(update_id = update.update_id, "processing update");
    dispatch(&state, update).await;
    Json(serde_json::json!({"status": "ok"}))
}

/// Route the update to the matching core handler.
async fn dispatch(state: &AppState, update: Update) {
    if let Some(callback) = update.callback_query {
        handle_callback(state, callback).await;
        return;
    }
    if let Some(message) = update.message {
        handle_message(state, message).await;
        return;
    }
    tracing::debug!(
        update_id = update.update_id,
        "update carries neither message nor callback; ignored"
    );
}

/// A button press: acknowledge, decode the token, run the confirmation
/// flow, and retire the prompt in place.
async fn handle_callback(state: &AppState, callback: CallbackQuery) {
    if let Err(e) = state.outbound.ack_callback(&callback.id).await {
        tracing::warn!(error = %e, callback_id = %callback.id, "failed to acknowledge callback");
    }

    let Some(data) = callback.data.as_deref() else {
        tracing::debug!(callback_id = %callback.id, "callback without data; ignored");
        return;
    };

    let token = match CallbackToken::parse(data) {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(error = %e, data, "unparseable callback data; ignored");
            return;
        }
    };

    let actor = callback.from.to_profile();
    let reply = state.service.handle_confirmation_action(&actor, token).await;

    // Edit the prompt message when we still know which one it was;
    // otherwise fall back to a fresh message in the actor's chat.
    let result = match &callback.message {
        Some(message) => {
            state
                .outbound
                .edit_reply(message.chat.id, message.message_id, &reply)
                .await
        }
        None => state.outbound.send_reply(actor.id.as_i64(), &reply).await,
    };
    if let Err(e) = result {
        tracing::error!(error = %e, user_id = %actor.id, "failed to deliver confirmation reply");
    }
}

/// A message: route commands to their handlers, plain text to the
/// redirect, and deliver the reply to the originating chat.
async fn handle_message(state: &AppState, message: Message) {
    let Some(from) = &message.from else {
        tracing::debug!(message_id = message.message_id, "message without sender; ignored");
        return;
    };
    let Some(text) = message.text.as_deref() else {
        tracing::debug!(message_id = message.message_id, "non-text message; ignored");
        return;
    };

    let profile = from.to_profile();
    let reply = match parse_command(text) {
        Some(("start", _)) => Some(state.service.handle_start(&profile).await),
        Some(("help", _)) => Some(state.service.handle_help(&profile).await),
        Some(("count", _)) => {
            Some(
                state
                    .service
                    .handle_admin_command(&profile, AdminCommand::Count)
                    .await,
            )
        }
        Some(("list", _)) => {
            Some(
                state
                    .service
                    .handle_admin_command(&profile, AdminCommand::List)
                    .await,
            )
        }
        Some(("notify", args)) => Some(
            state
                .service
                .handle_admin_command(
                    &profile,
                    AdminCommand::Notify {
                        message: args.to_string(),
                    },
                )
                .await,
        ),
        Some((other, _)) => {
            tracing::debug!(command = other, "unknown command; ignored");
            None
        }
        None => Some(state.service.handle_plain_text(&profile).await),
    };

    if let Some(reply) = reply {
        if let Err(e) = state.outbound.send_reply(message.chat.id, &reply).await {
            tracing::error!(error = %e, chat_id = message.chat.id, "failed to deliver reply");
        }
    }
}

/// Split `/command[@botname] args` into `(command, args)`.
///
/// Returns `None` for non-command text.
fn parse_command(text: &str) -> Option<(&str, &str)> {
    let rest = text.trim_start().strip_prefix('/')?;
    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim_start()),
        None => (rest, ""),
    };
    // Group chats address commands as /command@botname.
    let command = match head.split_once('@') {
        Some((command, _)) => command,
        None => head,
    };
    Some((command, args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_command_bare() {
        assert_eq!(parse_command("/start"), Some(("start", "")));
    }

    #[test]
    fn parse_command_with_args() {
        assert_eq!(
            parse_command("/notify The app is live!"),
            Some(("notify", "The app is live!"))
        );
    }

    #[test]
    fn parse_command_strips_bot_mention() {
        assert_eq!(parse_command("/count@herald_bot"), Some(("count", "")));
        assert_eq!(
            parse_command("/notify@herald_bot hi"),
            Some(("notify", "hi"))
        );
    }

    #[test]
    fn parse_command_rejects_plain_text() {
        assert_eq!(parse_command("hello"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("start"), None);
    }
}
