//! Logging initialization and configuration.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter used when neither `RUST_LOG` nor a configured filter is set.
pub const DEFAULT_FILTER: &str = "info,nodal=debug";

/// Initialize the logging system with tracing.
///
/// `RUST_LOG` takes precedence over `default_filter`. Output goes through a
/// `fmt` layer with targets and thread ids enabled.
///
/// # Example
/// ```no_run
/// nodal_core::init_logging(nodal_core::logging::DEFAULT_FILTER);
/// tracing::info!("Scene loaded");
/// ```
pub fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .init();
}
