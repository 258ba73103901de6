//! # stavba-client
//!
//! Boundary between the site application's UI and its domain core.  The UI
//! host owns a [`state::SharedState`] built by [`state::AppState::bootstrap`]
//! and calls the functions in [`commands`].

pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod geo;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

pub use config::ClientConfig;
pub use error::ClientError;
pub use state::{AppState, SharedState};

/// Install the global `tracing` subscriber.  `RUST_LOG` overrides the
/// default filter.  Calling it again is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("stavba_client_lib=debug,stavba_store=info,warn")
    });

    let installed = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Starting Stavba client");
    }
}
