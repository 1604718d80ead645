//! Logging initialization and configuration.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor a configured level is present.
const DEFAULT_FILTER: &str = "session_todos=info,tower_http=info";

/// Turn a configured level into a filter.
///
/// A bare level such as `debug` is scoped to this crate and the HTTP trace
/// layer; anything containing `=` or `,` is taken as a full directive.
fn filter_for(level: &str) -> EnvFilter {
    let level = level.trim();
    if level.is_empty() {
        return EnvFilter::new(DEFAULT_FILTER);
    }
    if level.contains('=') || level.contains(',') {
        EnvFilter::new(level)
    } else {
        EnvFilter::new(format!("session_todos={level},tower_http={level}"))
    }
}

/// Initialize the logging system with a configured level.
pub fn init_with_filter(level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}

/// Try to initialize the logging system.
///
/// Returns `Ok(())` if successful, or `Err` if logging has already been
/// initialized.
pub fn try_init() -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}
