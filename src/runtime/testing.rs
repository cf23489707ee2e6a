//! Mock implementations and end-to-end scenario tests
//!
//! These mocks enable driving the real event loop without real I/O.

use super::traits::{DeliveryError, Forwarder, Responder};
use super::{SessionManager, SessionRuntime};
use crate::state_machine::{
    DialogContext, DialogState, Event, Prompt, Record, RecordKind, ReviewAction,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// ============================================================================
// Mock Responder
// ============================================================================

/// Records every reply it is asked to deliver
#[derive(Default)]
pub struct MockResponder {
    pub replies: Mutex<Vec<(i64, Prompt)>>,
}

impl MockResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<String> {
        self.replies
            .lock()
            .unwrap()
            .iter()
            .map(|(_, prompt)| prompt.text.clone())
            .collect()
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn reply(&self, chat_id: i64, prompt: &Prompt) -> Result<(), DeliveryError> {
        self.replies.lock().unwrap().push((chat_id, prompt.clone()));
        Ok(())
    }
}

// ============================================================================
// Mock Forwarder
// ============================================================================

/// Forwarder with queued outcomes; succeeds once the queue is drained
#[derive(Default)]
pub struct MockForwarder {
    outcomes: Mutex<VecDeque<Result<(), DeliveryError>>>,
    pub forwarded: Mutex<Vec<Record>>,
}

impl MockForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a failure for the next forward attempt
    pub fn queue_failure(&self, reason: &str) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(DeliveryError::Transport(reason.to_string())));
    }

    /// Records forwarded so far
    pub fn recorded(&self) -> Vec<Record> {
        self.forwarded.lock().unwrap().clone()
    }
}

#[async_trait]
impl Forwarder for MockForwarder {
    async fn forward(&self, record: &Record) -> Result<(), DeliveryError> {
        self.forwarded.lock().unwrap().push(record.clone());
        self.outcomes.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    type TestRuntime = SessionRuntime<MockResponder, MockForwarder>;

    fn harness() -> (TestRuntime, Arc<MockResponder>, Arc<MockForwarder>) {
        let responder = Arc::new(MockResponder::new());
        let forwarder = Arc::new(MockForwarder::new());
        let (_event_tx, event_rx) = mpsc::channel(8);
        let runtime = SessionRuntime::new(
            1001,
            DialogContext::new("@admin"),
            DialogState::Idle,
            responder.clone(),
            forwarder.clone(),
            event_rx,
        );
        (runtime, responder, forwarder)
    }

    fn text(s: &str) -> Event {
        Event::Text {
            text: s.to_string(),
            sender: Some("seller".to_string()),
        }
    }

    fn press(action: ReviewAction) -> Event {
        Event::Review {
            action,
            sender: Some("seller".to_string()),
        }
    }

    #[tokio::test]
    async fn scenario_income_confirmed_and_delivered_once() {
        let (mut runtime, responder, forwarder) = harness();

        runtime.process_event(Event::Reset).await;
        runtime.process_event(text("Приход")).await;
        runtime.process_event(text("ИП Цацура Е.Е.")).await;
        runtime.process_event(text("Флешка 2шт - 48000")).await;
        runtime.process_event(press(ReviewAction::Confirm)).await;

        assert_eq!(runtime.state(), &DialogState::Idle);

        let records = forwarder.recorded();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, RecordKind::Income);
        assert_eq!(records[0].method, "ИП Цацура Е.Е.");
        assert_eq!(records[0].details, "Флешка 2шт - 48000");
        assert_eq!(records[0].sender.as_deref(), Some("seller"));

        let texts = responder.texts();
        assert!(texts.last().unwrap().contains("@admin"));
    }

    #[tokio::test]
    async fn scenario_forward_failure_keeps_review_and_retries_same_record() {
        let (mut runtime, responder, forwarder) = harness();
        forwarder.queue_failure("recipient unreachable");

        runtime.process_event(Event::Reset).await;
        runtime.process_event(text("Приход")).await;
        runtime.process_event(text("Наличные")).await;
        runtime.process_event(text("Флешка 2шт - 48000")).await;
        runtime.process_event(press(ReviewAction::Confirm)).await;

        // First attempt failed: still reviewing, user saw the retry message
        assert!(runtime.state().is_reviewing());
        assert!(responder.texts().last().unwrap().contains("❌"));

        runtime.process_event(press(ReviewAction::Confirm)).await;

        assert_eq!(runtime.state(), &DialogState::Idle);
        let records = forwarder.recorded();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], records[1]);
    }

    #[tokio::test]
    async fn scenario_expense_edit_replaces_details() {
        let (mut runtime, _responder, forwarder) = harness();

        runtime.process_event(Event::Reset).await;
        runtime.process_event(text("Расход")).await;
        runtime.process_event(text("Крипта")).await;
        runtime.process_event(text("700000 отправка образцов")).await;
        runtime.process_event(press(ReviewAction::Edit)).await;
        runtime
            .process_event(text("800000 отправка образцов v2"))
            .await;
        runtime.process_event(press(ReviewAction::Confirm)).await;

        let records = forwarder.recorded();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, RecordKind::Expense);
        assert_eq!(records[0].method, "Крипта");
        assert_eq!(records[0].details, "800000 отправка образцов v2");
    }

    #[tokio::test]
    async fn scenario_expense_only_label_rejected_for_income() {
        let (mut runtime, responder, forwarder) = harness();

        runtime.process_event(Event::Reset).await;
        runtime.process_event(text("Приход")).await;
        runtime.process_event(text("Крипта")).await;

        assert_eq!(
            runtime.state(),
            &DialogState::ChoosingMethod {
                kind: RecordKind::Income
            }
        );
        assert!(forwarder.recorded().is_empty());
        assert!(responder
            .texts()
            .last()
            .unwrap()
            .contains("Пожалуйста, выберите"));
    }

    #[tokio::test]
    async fn reset_mid_flow_wipes_accumulated_data() {
        let (mut runtime, _responder, forwarder) = harness();

        runtime.process_event(Event::Reset).await;
        runtime.process_event(text("Расход")).await;
        runtime.process_event(text("Крипта")).await;
        runtime.process_event(Event::Reset).await;

        assert_eq!(runtime.state(), &DialogState::ChoosingKind);

        // The restarted flow carries nothing over from the aborted one
        runtime.process_event(text("Приход")).await;
        runtime.process_event(text("Наличные")).await;
        runtime.process_event(text("Диск 1шт - 22000")).await;
        runtime.process_event(press(ReviewAction::Confirm)).await;

        let records = forwarder.recorded();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].method, "Наличные");
    }

    async fn wait_until(check: impl Fn() -> bool) {
        for _ in 0..200 {
            if check() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not reached within 2s");
    }

    #[tokio::test]
    async fn manager_runs_sessions_independently() {
        let responder = Arc::new(MockResponder::new());
        let forwarder = Arc::new(MockForwarder::new());
        let manager = SessionManager::new(
            DialogContext::new("@admin"),
            responder.clone(),
            forwarder.clone(),
        );

        for event in [
            Event::Reset,
            text("Приход"),
            text("Наличные"),
            text("Флешка 2шт - 48000"),
            press(ReviewAction::Confirm),
        ] {
            manager.dispatch(1001, event).await.unwrap();
        }
        // A second user mid-flow must not disturb the first
        manager.dispatch(2002, Event::Reset).await.unwrap();
        manager.dispatch(2002, text("Расход")).await.unwrap();

        wait_until(|| forwarder.recorded().len() == 1).await;

        let records = forwarder.recorded();
        assert_eq!(records[0].method, "Наличные");

        wait_until(|| {
            responder
                .replies
                .lock()
                .unwrap()
                .iter()
                .any(|(chat_id, prompt)| *chat_id == 2002 && prompt.text.contains("расхода"))
        })
        .await;
    }
}
