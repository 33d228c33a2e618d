//! # sakan-client
//!
//! The application core behind the Sakan UI: authentication, favorites, and
//! the domain mutators, all expressed as command functions over an explicit
//! [`state::AppState`] handle, plus the remote AI assistant client.

pub mod ai;
pub mod commands;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise logging for the desktop shell.  Call once at startup.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sakan_client=debug,sakan_store=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    tracing::info!("Starting Sakan client core");
}
