//! Session runtime executor

use super::traits::{Forwarder, Responder};
use crate::state_machine::{transition, DialogContext, DialogState, Effect, Event};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Event loop owning one user's dialog state.
///
/// Events are processed strictly in arrival order; a forward attempt
/// completes before the next event is taken off the queue.
pub struct SessionRuntime<R, F> {
    chat_id: i64,
    context: DialogContext,
    state: DialogState,
    responder: Arc<R>,
    forwarder: Arc<F>,
    event_rx: mpsc::Receiver<Event>,
}

impl<R, F> SessionRuntime<R, F>
where
    R: Responder,
    F: Forwarder,
{
    pub fn new(
        chat_id: i64,
        context: DialogContext,
        state: DialogState,
        responder: Arc<R>,
        forwarder: Arc<F>,
        event_rx: mpsc::Receiver<Event>,
    ) -> Self {
        Self {
            chat_id,
            context,
            state,
            responder,
            forwarder,
            event_rx,
        }
    }

    pub async fn run(mut self) {
        tracing::debug!(chat_id = self.chat_id, "Starting session runtime");

        while let Some(event) = self.event_rx.recv().await {
            self.process_event(event).await;
        }

        tracing::debug!(chat_id = self.chat_id, "Session runtime stopped");
    }

    /// Apply one inbound event plus any effect-generated follow-ups
    pub(crate) async fn process_event(&mut self, event: Event) {
        let mut events = vec![event];

        while let Some(current) = events.pop() {
            // Pure state transition
            let result = transition(&self.state, &self.context, current);

            let changed = result.new_state != self.state;
            self.state = result.new_state;
            if changed {
                tracing::debug!(chat_id = self.chat_id, state = ?self.state, "State change");
            }

            // Execute effects; a forward attempt feeds its outcome back
            // into the transition loop
            for effect in result.effects {
                if let Some(generated) = self.execute_effect(effect).await {
                    events.push(generated);
                }
            }
        }
    }

    async fn execute_effect(&self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::Reply(prompt) => {
                if let Err(e) = self.responder.reply(self.chat_id, &prompt).await {
                    tracing::warn!(chat_id = self.chat_id, error = %e, "Failed to deliver reply");
                }
                None
            }
            Effect::Forward(record) => match self.forwarder.forward(&record).await {
                Ok(()) => Some(Event::ForwardDelivered),
                Err(e) => {
                    tracing::error!(chat_id = self.chat_id, error = %e, "Failed to forward record");
                    Some(Event::ForwardFailed {
                        reason: e.to_string(),
                    })
                }
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &DialogState {
        &self.state
    }
}
