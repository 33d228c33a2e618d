//! # sakan-store
//!
//! Local persistence for the Sakan application.  A single key-value storage
//! backend holds one JSON entry per top-level collection; the [`DataStore`]
//! owns the in-memory [`Database`] snapshot, loads it once at startup, and
//! mirrors every change back to storage.

pub mod database;
pub mod session;
pub mod storage;
pub mod store;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use storage::Storage;
pub use store::DataStore;
