//! Pure state transition function

use super::prompt;
use super::state::{DialogContext, DialogState, Record, RecordKind};
use super::{Effect, Event, ReviewAction};

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: DialogState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: DialogState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    /// Append the entry prompt of the new state, when it has one
    fn with_entry_reply(self) -> Self {
        let reply = prompt::entry(&self.new_state).map(Effect::Reply);
        self.with_effects(reply)
    }
}

/// Pure transition function
///
/// Total over all `(state, event)` pairs: every input maps to a defined
/// outcome, so this returns a result directly rather than an error. Given
/// the same inputs it always produces the same outputs, with no I/O.
pub fn transition(state: &DialogState, context: &DialogContext, event: Event) -> TransitionResult {
    match (state, event) {
        // ============================================================
        // Reset: abort-and-restart from any state, wiping all data
        // ============================================================
        (_, Event::Reset) => TransitionResult::new(DialogState::ChoosingKind).with_entry_reply(),

        // ============================================================
        // Closed choices
        // ============================================================
        (DialogState::ChoosingKind, Event::Text { text, .. }) => {
            match RecordKind::from_label(&text) {
                Some(kind) => {
                    TransitionResult::new(DialogState::ChoosingMethod { kind }).with_entry_reply()
                }
                None => TransitionResult::new(state.clone())
                    .with_effect(Effect::Reply(prompt::invalid_choice(&prompt::KIND_LABELS))),
            }
        }

        (DialogState::ChoosingMethod { kind }, Event::Text { text, .. }) => {
            if kind.methods().contains(&text.as_str()) {
                TransitionResult::new(DialogState::EnteringDetails {
                    kind: *kind,
                    method: text,
                })
                .with_entry_reply()
            } else {
                TransitionResult::new(state.clone())
                    .with_effect(Effect::Reply(prompt::invalid_choice(kind.methods())))
            }
        }

        // ============================================================
        // Free-text details: stored verbatim, no validation
        // ============================================================
        (DialogState::EnteringDetails { kind, method }, Event::Text { text, sender }) => {
            TransitionResult::new(DialogState::Reviewing {
                kind: *kind,
                method: method.clone(),
                details: text,
                sender,
            })
            .with_entry_reply()
        }

        // ============================================================
        // Review screen
        // ============================================================
        (
            DialogState::Reviewing {
                kind,
                method,
                details,
                sender,
            },
            Event::Review {
                action: ReviewAction::Confirm,
                sender: confirmer,
            },
        ) => {
            // The session stays in review until the forward outcome comes
            // back, so a failed attempt can be retried with the same record.
            let record = Record {
                kind: *kind,
                method: method.clone(),
                details: details.clone(),
                sender: confirmer.or_else(|| sender.clone()),
            };
            TransitionResult::new(state.clone()).with_effect(Effect::Forward(record))
        }

        (
            DialogState::Reviewing { kind, method, .. },
            Event::Review {
                action: ReviewAction::Edit,
                ..
            },
        ) => {
            // Only the free-text details are discarded; the chosen method
            // survives the edit.
            TransitionResult::new(DialogState::EnteringDetails {
                kind: *kind,
                method: method.clone(),
            })
            .with_entry_reply()
        }

        (DialogState::Reviewing { .. }, Event::ForwardDelivered) => {
            TransitionResult::new(DialogState::Idle)
                .with_effect(Effect::Reply(prompt::delivered(context)))
        }

        (DialogState::Reviewing { .. }, Event::ForwardFailed { .. }) => {
            TransitionResult::new(state.clone())
                .with_effect(Effect::Reply(prompt::forward_failed()))
        }

        // Unexpected text on the review screen re-prompts the preview
        (DialogState::Reviewing { .. }, Event::Text { .. }) => {
            TransitionResult::new(state.clone()).with_entry_reply()
        }

        // ============================================================
        // Everything else
        // ============================================================

        // A forward outcome can only be stale outside review (a reset won
        // the race); the wipe stands.
        (_, Event::ForwardDelivered | Event::ForwardFailed { .. }) => {
            TransitionResult::new(state.clone())
        }

        // Unrecognized input outside any awaited step
        (_, Event::Text { .. } | Event::Review { .. }) => {
            TransitionResult::new(state.clone()).with_effect(Effect::Reply(prompt::guidance()))
        }
    }
}
