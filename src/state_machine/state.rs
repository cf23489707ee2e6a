//! Dialog state types

use serde::{Deserialize, Serialize};

/// Payment entities selectable for income records
pub const PAYMENT_METHODS: [&str; 5] = [
    "ИП Цацура Е.Е.",
    "ИП Цацура Д.Е.",
    "Наличные",
    "ООО «Самурай 24»",
    "ООО «ГУАРДДО»",
];

/// Expense channels: every payment entity plus expense-only categories
pub const EXPENSE_METHODS: [&str; 7] = [
    "ИП Цацура Е.Е.",
    "ИП Цацура Д.Е.",
    "Наличные",
    "ООО «Самурай 24»",
    "ООО «ГУАРДДО»",
    "Крипта",
    "Перевод на карту",
];

/// Which ledger a finalized record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    /// Button label offered on the kind menu
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Income => "Приход",
            RecordKind::Expense => "Расход",
        }
    }

    /// Exact-match parse of a kind label (no case folding)
    pub fn from_label(text: &str) -> Option<Self> {
        match text {
            "Приход" => Some(RecordKind::Income),
            "Расход" => Some(RecordKind::Expense),
            _ => None,
        }
    }

    /// Method labels offered for this kind
    pub fn methods(self) -> &'static [&'static str] {
        match self {
            RecordKind::Income => &PAYMENT_METHODS,
            RecordKind::Expense => &EXPENSE_METHODS,
        }
    }
}

/// Per-user dialog state.
///
/// Choice and free-text data accumulates inside the variants, so a state
/// can only ever hold fields from steps it has actually passed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DialogState {
    /// No dialog in progress
    #[default]
    Idle,

    /// Waiting for the income/expense choice
    ChoosingKind,

    /// Waiting for a method pick from the kind's label list
    ChoosingMethod { kind: RecordKind },

    /// Waiting for free-text details
    EnteringDetails { kind: RecordKind, method: String },

    /// Preview shown, waiting for confirm/edit.
    ///
    /// `sender` is the display name captured from the event that entered
    /// review; the preview is rendered from this snapshot alone.
    Reviewing {
        kind: RecordKind,
        method: String,
        details: String,
        sender: Option<String>,
    },
}

impl DialogState {
    /// Check if a confirm/edit control is currently awaited
    #[allow(dead_code)] // State query utility
    pub fn is_reviewing(&self) -> bool {
        matches!(self, DialogState::Reviewing { .. })
    }
}

/// Finalized payload forwarded to the recipient.
///
/// Built transiently at confirmation time, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub kind: RecordKind,
    pub method: String,
    pub details: String,
    pub sender: Option<String>,
}

/// Placeholder shown when the sender has no display name
pub const SENDER_PLACEHOLDER: &str = "Неизвестно";

impl Record {
    /// Compose the message text delivered to the recipient
    pub fn render(&self) -> String {
        let sender = self.sender.as_deref().unwrap_or(SENDER_PLACEHOLDER);
        match self.kind {
            RecordKind::Income => format!(
                "📦 Новый заказ!\n\n💰 Тип оплаты: {}\n📦 Детали заказа:\n{}\n👤 Отправитель: @{sender}",
                self.method, self.details
            ),
            RecordKind::Expense => format!(
                "💸 Новый расход!\n\n💸 Способ расхода: {}\n📦 Детали:\n{}\n👤 Отправитель: @{sender}",
                self.method, self.details
            ),
        }
    }
}

/// Context for a dialog (immutable configuration)
#[derive(Debug, Clone)]
pub struct DialogContext {
    /// Human-readable label of the forward recipient, used in the
    /// delivery acknowledgement
    pub recipient_label: String,
}

impl DialogContext {
    pub fn new(recipient_label: impl Into<String>) -> Self {
        Self {
            recipient_label: recipient_label.into(),
        }
    }
}
