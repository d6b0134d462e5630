//! Logging setup.
//!
//! JSON lines on stdout, filtered through `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "club_server=debug,club_maintenance=debug,sqlx=warn";

/// Build the log filter from `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`].
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global JSON subscriber.
///
/// Calling this twice is harmless; the second install is ignored.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(filter = DEFAULT_LOG_FILTER, "Tracing initialized");
    }
}
