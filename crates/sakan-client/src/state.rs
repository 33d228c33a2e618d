//! Application state handed to every command.
//!
//! There is no ambient global: the UI constructs one [`AppState`] at startup
//! and passes it (mutably) into each command function.

use sakan_shared::ids::{IdGenerator, UuidGenerator};
use sakan_store::DataStore;

/// Central application state.
pub struct AppState {
    /// The owned data store; the only path to the canonical snapshot.
    pub store: DataStore,

    /// Id source injected into every mutator.
    pub ids: Box<dyn IdGenerator>,
}

impl AppState {
    /// Production state: UUID-backed ids.
    pub fn new(store: DataStore) -> Self {
        Self::with_ids(store, Box::new(UuidGenerator))
    }

    /// State with an explicit id generator (deterministic tests).
    pub fn with_ids(store: DataStore, ids: Box<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }
}
