//! Property-based tests for the dialog state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::prompt;
use super::state::*;
use super::transition::transition;
use super::{Effect, Event, ReviewAction};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> DialogContext {
    DialogContext::new("@admin")
}

fn all_labels() -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = prompt::KIND_LABELS.to_vec();
    labels.extend(EXPENSE_METHODS);
    labels
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_kind() -> impl Strategy<Value = RecordKind> {
    prop_oneof![Just(RecordKind::Income), Just(RecordKind::Expense)]
}

fn arb_sender() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-z_]{1,12}")
}

fn arb_state() -> impl Strategy<Value = DialogState> {
    prop_oneof![
        Just(DialogState::Idle),
        Just(DialogState::ChoosingKind),
        arb_kind().prop_map(|kind| DialogState::ChoosingMethod { kind }),
        (arb_kind(), "[а-яА-Яa-z0-9 ]{1,20}").prop_map(|(kind, method)| {
            DialogState::EnteringDetails { kind, method }
        }),
        (
            arb_kind(),
            "[а-яА-Яa-z0-9 ]{1,20}",
            "[а-яА-Яa-z0-9 \n-]{1,40}",
            arb_sender()
        )
            .prop_map(|(kind, method, details, sender)| DialogState::Reviewing {
                kind,
                method,
                details,
                sender,
            }),
    ]
}

fn arb_review_action() -> impl Strategy<Value = ReviewAction> {
    prop_oneof![Just(ReviewAction::Confirm), Just(ReviewAction::Edit)]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Reset),
        ("[а-яА-Яa-z0-9 /]{0,30}", arb_sender())
            .prop_map(|(text, sender)| Event::Text { text, sender }),
        (arb_review_action(), arb_sender())
            .prop_map(|(action, sender)| Event::Review { action, sender }),
        Just(Event::ForwardDelivered),
        "[a-z ]{1,20}".prop_map(|reason| Event::ForwardFailed { reason }),
    ]
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    /// The machine is total and deterministic: any (state, event) pair
    /// transitions without panicking, and identical inputs yield identical
    /// outputs.
    #[test]
    fn transition_is_total_and_deterministic(
        state in arb_state(),
        event in arb_event(),
    ) {
        let first = transition(&state, &test_context(), event.clone());
        let second = transition(&state, &test_context(), event);
        prop_assert_eq!(first.new_state, second.new_state);
        prop_assert_eq!(first.effects, second.effects);
    }

    /// A reset restarts the dialog from any state, regardless of how far
    /// the previous record had progressed.
    #[test]
    fn reset_always_restarts(state in arb_state()) {
        let result = transition(&state, &test_context(), Event::Reset);
        prop_assert_eq!(result.new_state, DialogState::ChoosingKind);
    }

    /// Text that matches none of the configured labels leaves a
    /// closed-choice state unchanged.
    #[test]
    fn unmatched_choice_text_never_advances(
        state in prop_oneof![
            Just(DialogState::ChoosingKind),
            arb_kind().prop_map(|kind| DialogState::ChoosingMethod { kind }),
        ],
        text in "[а-яА-Яa-z0-9 ]{0,30}",
        sender in arb_sender(),
    ) {
        prop_assume!(!all_labels().contains(&text.as_str()));
        let result = transition(&state, &test_context(), Event::Text { text, sender });
        prop_assert_eq!(result.new_state, state);
        prop_assert!(result.effects.iter().all(|e| matches!(e, Effect::Reply(_))));
    }

    /// A record is forwarded exactly when Confirm is pressed on a review
    /// screen; no other input ever produces a forward.
    #[test]
    fn forward_only_on_confirm_in_review(
        state in arb_state(),
        event in arb_event(),
    ) {
        let expects_forward = state.is_reviewing()
            && matches!(
                event,
                Event::Review { action: ReviewAction::Confirm, .. }
            );
        let result = transition(&state, &test_context(), event);
        prop_assert_eq!(result.effects.iter().any(Effect::is_forward), expects_forward);
    }

    /// The confirmed record carries exactly the reviewed method and
    /// details.
    #[test]
    fn confirmed_record_matches_review_snapshot(
        kind in arb_kind(),
        method in "[а-яА-Яa-z0-9 ]{1,20}",
        details in "[а-яА-Яa-z0-9 \n-]{1,40}",
        sender in arb_sender(),
    ) {
        let state = DialogState::Reviewing {
            kind,
            method: method.clone(),
            details: details.clone(),
            sender: sender.clone(),
        };
        let event = Event::Review {
            action: ReviewAction::Confirm,
            sender: sender.clone(),
        };
        let result = transition(&state, &test_context(), event);
        let forwarded: Vec<_> = result
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::Forward(record) => Some(record),
                Effect::Reply(_) => None,
            })
            .collect();
        prop_assert_eq!(forwarded.len(), 1);
        prop_assert_eq!(&forwarded[0].method, &method);
        prop_assert_eq!(&forwarded[0].details, &details);
        prop_assert_eq!(forwarded[0].kind, kind);
    }

    /// Rendering is idempotent: the same snapshot always produces the same
    /// prompt.
    #[test]
    fn entry_prompt_is_idempotent(state in arb_state()) {
        prop_assert_eq!(prompt::entry(&state), prompt::entry(&state));
    }

    /// Forward failure reasons are operator-facing only; user replies get
    /// the generic retry message.
    #[test]
    fn failure_reason_never_reaches_the_user(
        state in arb_state(),
        reason in "secret-[a-z]{8}",
    ) {
        let result = transition(
            &state,
            &test_context(),
            Event::ForwardFailed { reason: reason.clone() },
        );
        for effect in &result.effects {
            if let Effect::Reply(p) = effect {
                prop_assert!(!p.text.contains(&reason));
            }
        }
    }
}
