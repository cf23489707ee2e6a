//! Effects produced by state transitions

use super::prompt::Prompt;
use super::state::Record;

/// Effects to be executed by the delivery shell after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a prompt back to the originating user
    Reply(Prompt),

    /// Deliver a finalized record to the configured recipient
    Forward(Record),
}

impl Effect {
    /// Check if this effect forwards a record
    #[allow(dead_code)] // Effect query utility
    pub fn is_forward(&self) -> bool {
        matches!(self, Effect::Forward(_))
    }
}
