//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// `default_level` applies when `RUST_LOG` is unset. With
/// `use_basic_format` the output is human-readable text; otherwise each
/// line is a structured JSON record. Calling this more than once is a
/// no-op.
pub fn init_tracing(default_level: &str, use_basic_format: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_lowercase()));

    if use_basic_format {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(false)
            .try_init();
    }
}
