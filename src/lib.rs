//! Shared selection store for UI components
//!
//! A single piece of string state, the "currently chosen" category, that
//! many components read and write. Components receive a cloned
//! [`SelectionStore`] handle, call [`SelectionStore::set_global_var`] to
//! change the selection and [`SelectionStore::subscribe`] to be told when
//! it changes.
//!
//! ```
//! use selection_store::SelectionStore;
//!
//! let store = SelectionStore::new();
//! assert_eq!(store.chosen_state(), "Overall");
//!
//! store.subscribe(|change| println!("now showing {}", change.current));
//! store.set_global_var("Detail");
//! assert_eq!(store.chosen_state(), "Detail");
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod state;

pub use config::StoreConfig;
pub use message::SelectionMessage;
pub use state::{ChangeKind, GlobalState, SelectionChange, SelectionStore, SubscriptionId};
