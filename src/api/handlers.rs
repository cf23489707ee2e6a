//! Webhook request handlers

use super::AppState;
use crate::state_machine::{Event, ReviewAction};
use crate::telegram::Update;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};

const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Create the webhook router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/telegram/webhook", post(receive_update))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Receive one Bot API update and dispatch it to the owning session
async fn receive_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<Update>,
) -> StatusCode {
    if let Some(expected) = &state.config.webhook_secret {
        let presented = headers
            .get(SECRET_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok());
        if presented != Some(expected.as_str()) {
            tracing::warn!(update_id = update.update_id, "Webhook call with bad secret token");
            return StatusCode::UNAUTHORIZED;
        }
    }

    if let Some(query) = &update.callback_query {
        // Stop the client-side spinner; failure here is cosmetic
        if let Err(e) = state.telegram.answer_callback_query(&query.id).await {
            tracing::warn!(error = %e, "Failed to answer callback query");
        }
    }

    let update_id = update.update_id;
    match envelope(update) {
        Some((chat_id, event)) => {
            if let Err(e) = state.sessions.dispatch(chat_id, event).await {
                tracing::error!(chat_id, update_id, error = %e, "Failed to queue update");
                return StatusCode::INTERNAL_SERVER_ERROR;
            }
            StatusCode::OK
        }
        None => {
            tracing::debug!(update_id, "Ignoring unsupported update");
            StatusCode::OK
        }
    }
}

/// Map a raw update onto `(session id, engine event)`.
///
/// One explicit mapping with a deterministic default: `/start` resets, any
/// other message text goes to the state machine verbatim, review buttons
/// arrive as callback queries. Unknown callback data cannot be produced by
/// this bot's keyboards and is dropped.
fn envelope(update: Update) -> Option<(i64, Event)> {
    if let Some(message) = update.message {
        let chat_id = message.chat.id;
        let sender = message.from.and_then(|user| user.username);
        let text = message.text?;
        if is_start_command(&text) {
            return Some((chat_id, Event::Reset));
        }
        return Some((chat_id, Event::Text { text, sender }));
    }

    if let Some(query) = update.callback_query {
        let chat_id = query.message?.chat.id;
        let Some(action) = query
            .data
            .as_deref()
            .and_then(ReviewAction::from_callback_data)
        else {
            tracing::warn!(data = ?query.data, "Ignoring unknown callback data");
            return None;
        };
        let sender = query.from.username;
        return Some((chat_id, Event::Review { action, sender }));
    }

    None
}

/// `/start`, optionally with a bot mention or trailing arguments
fn is_start_command(text: &str) -> bool {
    let Some(first) = text.split_whitespace().next() else {
        return false;
    };
    let command = first.split('@').next().unwrap_or(first);
    command == "/start"
}
