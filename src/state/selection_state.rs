//! Shared selection state
//!
//! Holds the "currently chosen" label that several UI components read and
//! write. The store is an explicit handle: create it once at startup and
//! clone it into every component that needs it. All clones share the same
//! value and the same subscribers.

use super::subscription::{ChangeKind, SelectionChange, Subscribers, SubscriptionId};
use crate::config::{StoreConfig, DEFAULT_SELECTION};
use crate::error::StateResult;
use crate::message::SelectionMessage;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Serializable snapshot of the store's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalState {
    /// The currently chosen category/label
    #[serde(rename = "chosenState")]
    pub chosen_state: String,
}

impl Default for GlobalState {
    fn default() -> Self {
        Self {
            chosen_state: DEFAULT_SELECTION.to_string(),
        }
    }
}

struct StoreInner {
    store_id: String,
    initial_selection: String,
    log_changes: bool,
    chosen_state: RefCell<String>,
    subscribers: RefCell<Subscribers>,
    // Bumped on every mutation; stale notifications stop when it moves on
    generation: Cell<u64>,
}

/// Handle to a shared selection store
///
/// Single-threaded by construction: the handle is `!Send` and is meant to
/// live on the UI event loop.
#[derive(Clone)]
pub struct SelectionStore {
    inner: Rc<StoreInner>,
}

/// Non-owning handle, for callbacks that need to read the store they are
/// registered on without keeping it alive
#[derive(Clone)]
pub struct WeakSelectionStore {
    inner: Weak<StoreInner>,
}

impl WeakSelectionStore {
    /// Get a strong handle if the store still exists
    pub fn upgrade(&self) -> Option<SelectionStore> {
        self.inner.upgrade().map(|inner| SelectionStore { inner })
    }
}

impl SelectionStore {
    /// Create a store with the default id and selection
    pub fn new() -> Self {
        Self::from_config(&StoreConfig::default())
    }

    /// Create a store from configuration
    pub fn from_config(config: &StoreConfig) -> Self {
        log::debug!(
            "Creating store '{}' with initial selection {:?}",
            config.store_id,
            config.initial_selection
        );
        Self {
            inner: Rc::new(StoreInner {
                store_id: config.store_id.clone(),
                initial_selection: config.initial_selection.clone(),
                log_changes: config.log_changes,
                chosen_state: RefCell::new(config.initial_selection.clone()),
                subscribers: RefCell::new(Subscribers::default()),
                generation: Cell::new(0),
            }),
        }
    }

    /// Name the store is registered under
    pub fn store_id(&self) -> &str {
        &self.inner.store_id
    }

    /// Value the store started with
    pub fn initial_selection(&self) -> &str {
        &self.inner.initial_selection
    }

    /// Current selection
    pub fn chosen_state(&self) -> String {
        self.inner.chosen_state.borrow().clone()
    }

    /// Run a closure against the current selection
    ///
    /// The closure sees a copy taken before it runs, so it may write to
    /// the store.
    pub fn with_chosen_state<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let current = self.chosen_state();
        f(&current)
    }

    /// Replace the current selection and notify subscribers
    ///
    /// Any string is accepted as-is, including the empty string.
    pub fn set_global_var(&self, new_value: impl Into<String>) {
        self.apply(new_value.into(), ChangeKind::Assign);
    }

    /// Return to the initial selection
    pub fn reset(&self) {
        self.apply(self.inner.initial_selection.clone(), ChangeKind::Reset);
    }

    /// Snapshot of the current state
    pub fn state(&self) -> GlobalState {
        GlobalState {
            chosen_state: self.chosen_state(),
        }
    }

    /// Replace the current selection from a snapshot
    pub fn hydrate(&self, state: GlobalState) {
        self.apply(state.chosen_state, ChangeKind::Hydrate);
    }

    /// Parse a JSON snapshot and hydrate from it
    ///
    /// The store is left untouched if the snapshot does not parse.
    pub fn hydrate_json(&self, json: &str) -> StateResult<()> {
        let state: GlobalState = serde_json::from_str(json).map_err(|e| {
            log::warn!("Rejected snapshot for store '{}': {}", self.store_id(), e);
            e
        })?;
        self.hydrate(state);
        Ok(())
    }

    /// Dispatch a message to the matching action
    pub fn update(&self, message: SelectionMessage) {
        match message {
            SelectionMessage::SetGlobalVar(value) => self.set_global_var(value),
            SelectionMessage::Reset => self.reset(),
            SelectionMessage::Hydrate(state) => self.hydrate(state),
        }
    }

    /// Register a callback invoked after every mutation
    pub fn subscribe(&self, callback: impl Fn(&SelectionChange) + 'static) -> SubscriptionId {
        let id = self.inner.subscribers.borrow_mut().insert(Rc::new(callback));
        log::trace!("Store '{}': subscribed {}", self.store_id(), id);
        id
    }

    /// Remove a callback; returns false if it was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.inner.subscribers.borrow_mut().remove(id);
        if removed {
            log::trace!("Store '{}': unsubscribed {}", self.store_id(), id);
        }
        removed
    }

    /// Drop every registered callback
    pub fn clear_subscribers(&self) {
        self.inner.subscribers.borrow_mut().clear();
    }

    /// Whether assignments are logged at debug level
    pub fn logs_changes(&self) -> bool {
        self.inner.log_changes
    }

    /// Number of registered callbacks
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Non-owning handle to this store
    pub fn downgrade(&self) -> WeakSelectionStore {
        WeakSelectionStore {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether two handles refer to the same store
    pub fn ptr_eq(&self, other: &SelectionStore) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn apply(&self, value: String, kind: ChangeKind) {
        // No borrow may be held past this point: callbacks are free to
        // read, write and (un)subscribe on this same store.
        let previous = self.inner.chosen_state.replace(value.clone());
        let generation = self.inner.generation.get().wrapping_add(1);
        self.inner.generation.set(generation);

        if self.inner.log_changes {
            log::debug!(
                "Store '{}': {:?} -> {:?} ({:?})",
                self.inner.store_id,
                previous,
                value,
                kind
            );
        }

        let change = SelectionChange {
            previous,
            current: value,
            kind,
            changed_at: chrono::Utc::now(),
        };

        let callbacks = self.inner.subscribers.borrow().snapshot();
        for callback in callbacks {
            // A callback wrote to the store: the nested mutation has already
            // notified everyone with the newer value.
            if self.inner.generation.get() != generation {
                log::trace!(
                    "Store '{}': superseded {:?}, skipping remaining subscribers",
                    self.inner.store_id,
                    change.current
                );
                break;
            }
            callback(&change);
        }
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("store_id", &self.inner.store_id)
            .field("chosen_state", &*self.inner.chosen_state.borrow())
            .field("subscribers", &*self.inner.subscribers.borrow())
            .finish()
    }
}
