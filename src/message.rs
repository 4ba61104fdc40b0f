//! Store message types
//!
//! UI layers express store actions as messages and route them into
//! `SelectionStore::update`.

use crate::state::GlobalState;

/// Actions accepted by the selection store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMessage {
    /// Replace the current selection
    SetGlobalVar(String),

    /// Return to the initial selection
    Reset,

    /// Replace the current selection from a snapshot
    Hydrate(GlobalState),
}

impl SelectionMessage {
    /// Convenience constructor for the common assignment case
    pub fn set(value: impl Into<String>) -> Self {
        SelectionMessage::SetGlobalVar(value.into())
    }
}
