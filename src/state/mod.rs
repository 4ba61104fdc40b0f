//! State management module for the selection store
//!
//! - `selection_state`: the shared selection and its handle
//! - `subscription`: observer registry and change events

mod selection_state;
mod subscription;

pub use selection_state::*;
pub use subscription::{ChangeKind, SelectionChange, SubscriptionId};
