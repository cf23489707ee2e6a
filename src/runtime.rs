//! Per-user session runtimes
//!
//! One tokio task per conversing user, fed by a bounded queue so a user's
//! events are processed strictly in arrival order. Sessions live in
//! process memory only; a restart resets every conversation.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::SessionRuntime;
pub use traits::*;

use crate::state_machine::{DialogContext, DialogState, Event};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// Type alias for the production manager wired to the Telegram transport
pub type ProductionSessionManager = SessionManager<TelegramResponder, TelegramForwarder>;

/// Handle to feed events into a running session
#[derive(Clone)]
pub struct SessionHandle {
    pub event_tx: mpsc::Sender<Event>,
}

/// Owner of all live sessions, keyed by Telegram chat id.
///
/// Sessions are never evicted; per-user memory retention is bounded only
/// by the user population.
pub struct SessionManager<R, F> {
    context: DialogContext,
    responder: Arc<R>,
    forwarder: Arc<F>,
    sessions: RwLock<HashMap<i64, SessionHandle>>,
}

impl<R, F> SessionManager<R, F>
where
    R: Responder + 'static,
    F: Forwarder + 'static,
{
    pub fn new(context: DialogContext, responder: Arc<R>, forwarder: Arc<F>) -> Self {
        Self {
            context,
            responder,
            forwarder,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Get or create the runtime task for a chat
    pub async fn get_or_create(&self, chat_id: i64) -> SessionHandle {
        {
            let sessions = self.sessions.read().await;
            if let Some(handle) = sessions.get(&chat_id) {
                return handle.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        // Raced writers: re-check under the write lock
        if let Some(handle) = sessions.get(&chat_id) {
            return handle.clone();
        }

        let (event_tx, event_rx) = mpsc::channel(32);
        let runtime = SessionRuntime::new(
            chat_id,
            self.context.clone(),
            DialogState::Idle,
            self.responder.clone(),
            self.forwarder.clone(),
            event_rx,
        );

        tokio::spawn(async move {
            runtime.run().await;
            tracing::debug!(chat_id, "Session runtime finished");
        });

        let handle = SessionHandle { event_tx };
        sessions.insert(chat_id, handle.clone());
        handle
    }

    /// Queue an event for a chat's session
    pub async fn dispatch(&self, chat_id: i64, event: Event) -> Result<(), String> {
        let handle = self.get_or_create(chat_id).await;
        handle
            .event_tx
            .send(event)
            .await
            .map_err(|e| format!("failed to queue event: {e}"))
    }
}
