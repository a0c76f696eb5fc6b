use tracing_subscriber::EnvFilter;

/// Install the global JSON subscriber writing to stderr.
///
/// `RUST_LOG` overrides the level. Without it, `quiet` selects `warn`,
/// otherwise `info`. Calling this more than once is harmless; later calls
/// leave the first subscriber in place.
pub fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if result.is_ok() {
        tracing::debug!(event = "core.logging.initialized", level = default_level);
    }
}
