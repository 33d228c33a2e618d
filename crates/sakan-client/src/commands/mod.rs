//! Command handlers invoked by the UI layer.
//!
//! Each sub-module groups related commands by domain.  Every command takes
//! the [`crate::state::AppState`] handle explicitly and returns either the
//! created entity or a discriminated outcome the UI renders directly.

pub mod auth;
pub mod favorites;
pub mod listings;
pub mod maintenance;
pub mod rentals;
