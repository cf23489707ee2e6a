//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::config::RecipientConfig;
use crate::state_machine::{Controls, Prompt, Record, ReviewAction};
use crate::telegram::{Client, ReplyMarkup, TelegramError};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Failure surfaced by the message transport
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("delivery timed out after {0:?}")]
    Timeout(Duration),
}

impl From<TelegramError> for DeliveryError {
    fn from(e: TelegramError) -> Self {
        DeliveryError::Transport(e.to_string())
    }
}

/// Delivery of prompts back to the originating user
#[async_trait]
pub trait Responder: Send + Sync {
    async fn reply(&self, chat_id: i64, prompt: &Prompt) -> Result<(), DeliveryError>;
}

/// Delivery of finalized records to the configured recipient
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(&self, record: &Record) -> Result<(), DeliveryError>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: Responder + ?Sized> Responder for Arc<T> {
    async fn reply(&self, chat_id: i64, prompt: &Prompt) -> Result<(), DeliveryError> {
        (**self).reply(chat_id, prompt).await
    }
}

#[async_trait]
impl<T: Forwarder + ?Sized> Forwarder for Arc<T> {
    async fn forward(&self, record: &Record) -> Result<(), DeliveryError> {
        (**self).forward(record).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Adapter replying through the Bot API
pub struct TelegramResponder {
    client: Arc<Client>,
}

impl TelegramResponder {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Responder for TelegramResponder {
    async fn reply(&self, chat_id: i64, prompt: &Prompt) -> Result<(), DeliveryError> {
        let markup = markup_for(prompt.controls);
        self.client
            .send_message(chat_id, &prompt.text, Some(markup))
            .await?;
        Ok(())
    }
}

/// Adapter forwarding records to the recipient chat, with a bounded
/// timeout so a stuck transport call surfaces as a failure
pub struct TelegramForwarder {
    client: Arc<Client>,
    recipient: RecipientConfig,
    timeout: Duration,
}

impl TelegramForwarder {
    pub fn new(client: Arc<Client>, recipient: RecipientConfig, timeout: Duration) -> Self {
        Self {
            client,
            recipient,
            timeout,
        }
    }
}

#[async_trait]
impl Forwarder for TelegramForwarder {
    async fn forward(&self, record: &Record) -> Result<(), DeliveryError> {
        let text = record.render();
        let send = self.client.send_message(self.recipient.chat_id, &text, None);
        match tokio::time::timeout(self.timeout, send).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(DeliveryError::Timeout(self.timeout)),
        }
    }
}

/// Map engine controls onto Bot API reply markup
fn markup_for(controls: Controls) -> ReplyMarkup {
    match controls {
        Controls::None => ReplyMarkup::remove(),
        Controls::Choices(labels) => ReplyMarkup::one_column(labels),
        Controls::ConfirmEdit => ReplyMarkup::inline_row(&[
            ("✅ Отправить", ReviewAction::Confirm.callback_data()),
            ("✏️ Изменить", ReviewAction::Edit.callback_data()),
        ]),
    }
}
