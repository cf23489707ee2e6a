//! Bot API wire types

use serde::{Deserialize, Serialize};

// ============================================================================
// Inbound updates
// ============================================================================

/// An incoming update delivered to the webhook
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[allow(dead_code)] // Wire completeness
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[allow(dead_code)] // Wire completeness
    pub id: i64,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    /// The message the pressed button was attached to
    pub message: Option<Message>,
    pub data: Option<String>,
}

// ============================================================================
// Outbound requests
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

#[derive(Debug, Serialize)]
pub struct AnswerCallbackQuery<'a> {
    pub callback_query_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SetWebhook<'a> {
    pub url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<&'a str>,
}

/// Keyboard attachment variants accepted by `sendMessage`
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Keyboard(ReplyKeyboardMarkup),
    Inline(InlineKeyboardMarkup),
    Remove(ReplyKeyboardRemove),
}

impl ReplyMarkup {
    /// One label per row, sized to content, dismissed after one use
    pub fn one_column(labels: &[&str]) -> Self {
        ReplyMarkup::Keyboard(ReplyKeyboardMarkup {
            keyboard: labels
                .iter()
                .map(|label| {
                    vec![KeyboardButton {
                        text: (*label).to_string(),
                    }]
                })
                .collect(),
            resize_keyboard: true,
            one_time_keyboard: true,
        })
    }

    /// A single row of inline buttons with `(label, callback data)` pairs
    pub fn inline_row(buttons: &[(&str, &str)]) -> Self {
        ReplyMarkup::Inline(InlineKeyboardMarkup {
            inline_keyboard: vec![buttons
                .iter()
                .map(|(text, data)| InlineKeyboardButton {
                    text: (*text).to_string(),
                    callback_data: (*data).to_string(),
                })
                .collect()],
        })
    }

    /// Dismiss the current reply keyboard
    pub fn remove() -> Self {
        ReplyMarkup::Remove(ReplyKeyboardRemove {
            remove_keyboard: true,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
    pub one_time_keyboard: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeyboardButton {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyKeyboardRemove {
    pub remove_keyboard: bool,
}

/// Envelope every Bot API method responds with
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_text_message_update() {
        let update: Update = serde_json::from_str(
            r#"{
                "update_id": 700123,
                "message": {
                    "message_id": 42,
                    "from": {"id": 1001, "is_bot": false, "first_name": "Вася", "username": "vasya"},
                    "chat": {"id": 1001, "type": "private"},
                    "date": 1722470400,
                    "text": "Приход"
                }
            }"#,
        )
        .unwrap();

        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 1001);
        assert_eq!(message.text.as_deref(), Some("Приход"));
        assert_eq!(message.from.unwrap().username.as_deref(), Some("vasya"));
        assert!(update.callback_query.is_none());
    }

    #[test]
    fn parses_a_callback_query_update() {
        let update: Update = serde_json::from_str(
            r#"{
                "update_id": 700124,
                "callback_query": {
                    "id": "8427000000001",
                    "from": {"id": 1001, "is_bot": false, "first_name": "Вася"},
                    "message": {
                        "message_id": 43,
                        "chat": {"id": 1001, "type": "private"},
                        "date": 1722470401,
                        "text": "Проверьте информацию"
                    },
                    "data": "confirm"
                }
            }"#,
        )
        .unwrap();

        let query = update.callback_query.unwrap();
        assert_eq!(query.data.as_deref(), Some("confirm"));
        assert_eq!(query.message.unwrap().chat.id, 1001);
        assert_eq!(query.from.username, None);
    }

    #[test]
    fn reply_markup_serializes_untagged() {
        let markup = ReplyMarkup::one_column(&["Приход", "Расход"]);
        let json = serde_json::to_value(&markup).unwrap();
        assert_eq!(json["keyboard"][1][0]["text"], "Расход");
        assert_eq!(json["one_time_keyboard"], true);

        let remove = serde_json::to_value(ReplyMarkup::remove()).unwrap();
        assert_eq!(remove["remove_keyboard"], true);
    }

    #[test]
    fn send_message_omits_missing_markup() {
        let request = SendMessage {
            chat_id: 5,
            text: "ok",
            reply_markup: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("reply_markup").is_none());
    }
}
