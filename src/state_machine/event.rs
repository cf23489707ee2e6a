//! Events that drive dialog transitions

/// The two buttons on a review screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Confirm,
    Edit,
}

impl ReviewAction {
    /// Wire representation carried in callback buttons
    pub fn callback_data(self) -> &'static str {
        match self {
            ReviewAction::Confirm => "confirm",
            ReviewAction::Edit => "edit",
        }
    }

    /// Exact-match parse of callback button data
    pub fn from_callback_data(data: &str) -> Option<Self> {
        match data {
            "confirm" => Some(ReviewAction::Confirm),
            "edit" => Some(ReviewAction::Edit),
            _ => None,
        }
    }
}

/// Events that trigger state transitions
///
/// `sender` carries the display name taken from the inbound event, when
/// the transport knows one.
#[derive(Debug, Clone)]
pub enum Event {
    /// The `/start` command: abort whatever is in flight and begin a new
    /// record
    Reset,

    /// Plain text from the user: a choice pick or free-text details,
    /// depending on the current state
    Text {
        text: String,
        sender: Option<String>,
    },

    /// Confirm/edit button press on a review screen
    Review {
        action: ReviewAction,
        sender: Option<String>,
    },

    /// Forward attempt succeeded, fed back by the runtime
    ForwardDelivered,

    /// Forward attempt failed, fed back by the runtime
    ForwardFailed { reason: String },
}
