//! Outbound render directives
//!
//! Rendering is a pure function of the dialog state snapshot: the same
//! state always yields the same prompt.

use super::state::{DialogContext, DialogState, RecordKind, SENDER_PLACEHOLDER};

/// Labels offered on the kind menu
pub const KIND_LABELS: [&str; 2] = ["Приход", "Расход"];

const DETAILS_PROMPT_INCOME: &str = "Напишите количество проданных товаров и финальную сумму, \
с упоминанием скидки если есть.\n\n\
Пример:\n\
Флешка 64гб 2шт. - 48 000\n\
Мини диск 1ТБ 1шт. - 22 000\n\n\
70 000 рублей\n\
С учётом скидки 15%\n\n\
ООО АНКОМ";

const DETAILS_PROMPT_EXPENSE: &str = "Напишите сумму и назначение расхода.\n\n\
Пример:\n\
700 000 отправка образцов";

/// Controls attached to an outbound prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controls {
    /// Plain text; any previous choice keyboard is dismissed
    None,

    /// Tappable option list; input must match one label exactly
    Choices(&'static [&'static str]),

    /// The two review buttons
    ConfirmEdit,
}

/// Outbound render directive for the delivery shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub controls: Controls,
}

impl Prompt {
    fn new(text: impl Into<String>, controls: Controls) -> Self {
        Self {
            text: text.into(),
            controls,
        }
    }
}

/// Entry prompt for a state. `Idle` has none.
pub fn entry(state: &DialogState) -> Option<Prompt> {
    match state {
        DialogState::Idle => None,
        DialogState::ChoosingKind => Some(Prompt::new(
            "Добро пожаловать! Выберите тип операции:",
            Controls::Choices(&KIND_LABELS),
        )),
        DialogState::ChoosingMethod { kind } => Some(Prompt::new(
            match kind {
                RecordKind::Income => "Выберите тип оплаты:",
                RecordKind::Expense => "Выберите способ расхода:",
            },
            Controls::Choices(kind.methods()),
        )),
        DialogState::EnteringDetails { kind, .. } => Some(Prompt::new(
            match kind {
                RecordKind::Income => DETAILS_PROMPT_INCOME,
                RecordKind::Expense => DETAILS_PROMPT_EXPENSE,
            },
            Controls::None,
        )),
        DialogState::Reviewing {
            kind,
            method,
            details,
            sender,
        } => Some(Prompt::new(
            preview(*kind, method, details, sender.as_deref()),
            Controls::ConfirmEdit,
        )),
    }
}

/// Re-prompt after input that matches none of the offered labels
pub fn invalid_choice(labels: &'static [&'static str]) -> Prompt {
    Prompt::new(
        "Пожалуйста, выберите один из предложенных вариантов",
        Controls::Choices(labels),
    )
}

/// Catch-all guidance for input outside any awaited step
pub fn guidance() -> Prompt {
    Prompt::new(
        "Используйте /start, чтобы создать новую запись",
        Controls::None,
    )
}

/// Acknowledgement after a successful forward, naming the recipient
pub fn delivered(context: &DialogContext) -> Prompt {
    Prompt::new(
        format!(
            "✅ Спасибо! Информация отправлена {} в систему учёта.\n\n\
             Для новой записи используйте /start",
            context.recipient_label
        ),
        Controls::None,
    )
}

/// Retryable failure message after a forward attempt fails
pub fn forward_failed() -> Prompt {
    Prompt::new(
        "❌ Произошла ошибка при отправке информации. \
         Попробуйте позже или обратитесь к администратору.",
        Controls::ConfirmEdit,
    )
}

fn preview(kind: RecordKind, method: &str, details: &str, sender: Option<&str>) -> String {
    let sender = sender.unwrap_or(SENDER_PLACEHOLDER);
    match kind {
        RecordKind::Income => format!(
            "📋 Проверьте информацию о заказе:\n\n\
             💰 Тип оплаты: {method}\n\
             📦 Детали заказа:\n{details}\n\
             👤 Отправитель: @{sender}\n\n\
             Всё верно? Выберите действие:"
        ),
        RecordKind::Expense => format!(
            "📋 Проверьте информацию о расходе:\n\n\
             💸 Способ расхода: {method}\n\
             📦 Детали:\n{details}\n\
             👤 Отправитель: @{sender}\n\n\
             Всё верно? Выберите действие:"
        ),
    }
}
