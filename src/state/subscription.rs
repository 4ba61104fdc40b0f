//! Observer registry for store changes
//!
//! Subscribers are plain callbacks invoked synchronously after every
//! mutation, in registration order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use uuid::Uuid;

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What caused a change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    /// Plain assignment through `set_global_var`
    Assign,
    /// Store returned to its initial value
    Reset,
    /// Value replaced from a snapshot
    Hydrate,
}

/// Event delivered to every subscriber after a mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChange {
    /// Value before the mutation
    pub previous: String,

    /// Value after the mutation
    pub current: String,

    /// Cause of the mutation
    pub kind: ChangeKind,

    /// When the mutation happened
    pub changed_at: DateTime<Utc>,
}

impl SelectionChange {
    /// Whether the stored value actually differs from before
    pub fn is_changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Callback type stored by the registry
pub(crate) type Callback = Rc<dyn Fn(&SelectionChange)>;

/// Ordered set of registered callbacks
#[derive(Default)]
pub(crate) struct Subscribers {
    entries: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    pub fn insert(&mut self, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.entries.push((id, callback));
        id
    }

    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Clone the current callbacks so they can run without holding a borrow
    pub fn snapshot(&self) -> Vec<Callback> {
        self.entries.iter().map(|(_, cb)| Rc::clone(cb)).collect()
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(id, _)| id))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn change(previous: &str, current: &str) -> SelectionChange {
        SelectionChange {
            previous: previous.to_string(),
            current: current.to_string(),
            kind: ChangeKind::Assign,
            changed_at: Utc::now(),
        }
    }

    #[test]
    fn test_subscription_ids_unique() {
        assert_ne!(SubscriptionId::new(), SubscriptionId::new());
    }

    #[test]
    fn test_insert_and_remove() {
        let mut subs = Subscribers::default();
        let id = subs.insert(Rc::new(|_| {}));
        subs.insert(Rc::new(|_| {}));
        assert_eq!(subs.len(), 2);

        assert!(subs.remove(id));
        assert!(!subs.remove(id));
        assert_eq!(subs.len(), 1);

        subs.clear();
        assert_eq!(subs.len(), 0);
    }

    #[test]
    fn test_snapshot_keeps_order() {
        let order = Rc::new(Cell::new(0u32));
        let mut subs = Subscribers::default();
        for expected in 0..3 {
            let order = Rc::clone(&order);
            subs.insert(Rc::new(move |_| {
                assert_eq!(order.get(), expected);
                order.set(expected + 1);
            }));
        }

        let event = change("Overall", "Detail");
        for cb in subs.snapshot() {
            cb(&event);
        }
        assert_eq!(order.get(), 3);
    }

    #[test]
    fn test_is_changed() {
        assert!(change("Overall", "Detail").is_changed());
        assert!(!change("Detail", "Detail").is_changed());
    }
}
