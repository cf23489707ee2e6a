//! Bot API client

use super::types::{
    AnswerCallbackQuery, ApiResponse, Message, ReplyMarkup, SendMessage, SetWebhook,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

const API_BASE: &str = "https://api.telegram.org";

/// Bot API error with classification
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Network issues, timeouts - retryable
    #[error("network error: {0}")]
    Network(String),

    /// The Bot API rejected the call
    #[error("Bot API error: {description}")]
    Api {
        code: Option<i64>,
        description: String,
    },

    /// Response body did not match the expected shape
    #[error("malformed Bot API response: {0}")]
    Decode(String),
}

/// Minimal Bot API client
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(token: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: format!("{API_BASE}/bot{token}"),
        }
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<ReplyMarkup>,
    ) -> Result<Message, TelegramError> {
        self.call(
            "sendMessage",
            &SendMessage {
                chat_id,
                text,
                reply_markup,
            },
        )
        .await
    }

    /// Acknowledge a button press so the client stops its spinner
    pub async fn answer_callback_query(&self, id: &str) -> Result<bool, TelegramError> {
        self.call(
            "answerCallbackQuery",
            &AnswerCallbackQuery {
                callback_query_id: id,
            },
        )
        .await
    }

    pub async fn set_webhook(
        &self,
        url: &str,
        secret_token: Option<&str>,
    ) -> Result<bool, TelegramError> {
        self.call("setWebhook", &SetWebhook { url, secret_token })
            .await
    }

    async fn call<T, R>(&self, method: &str, payload: &T) -> Result<R, TelegramError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}/{method}", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TelegramError::Network(format!("failed to read response: {e}")))?;

        let parsed: ApiResponse<R> = serde_json::from_str(&body)
            .map_err(|e| TelegramError::Decode(format!("HTTP {status}: {e}")))?;

        if parsed.ok {
            parsed
                .result
                .ok_or_else(|| TelegramError::Decode("ok response without result".to_string()))
        } else {
            Err(TelegramError::Api {
                code: parsed.error_code,
                description: parsed
                    .description
                    .unwrap_or_else(|| format!("HTTP {status}")),
            })
        }
    }
}

fn classify_transport(e: reqwest::Error) -> TelegramError {
    if e.is_timeout() {
        TelegramError::Network(format!("request timeout: {e}"))
    } else if e.is_connect() {
        TelegramError::Network(format!("connection failed: {e}"))
    } else {
        TelegramError::Network(format!("request failed: {e}"))
    }
}
