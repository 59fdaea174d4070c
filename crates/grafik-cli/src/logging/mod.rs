//! `tracing` subscriber setup for the binary. Library `log` records are
//! forwarded through the same subscriber.

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::INFO;

/// Installs a stderr subscriber at the level picked by [`resolve_level()`].
pub(crate) fn init(verbose: bool) {
    let env_value = std::env::var("LOG_LEVEL").ok();
    let (log_level, warning) = resolve_level(verbose, env_value.as_deref());

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
    log::trace!("Initial logging level set to `{log_level}`.");

    if let Some(warning) = warning {
        log::warn!("{warning}");
    }
}

/// `--verbose` wins over `LOG_LEVEL`. An unrecognised `LOG_LEVEL` falls back
/// to INFO and yields a warning to log once the subscriber is up.
pub(crate) fn resolve_level(
    verbose: bool,
    env_value: Option<&str>,
) -> (tracing::Level, Option<String>) {
    if verbose {
        return (tracing::Level::DEBUG, None);
    }
    let Some(raw) = env_value else {
        return (DEFAULT_LOG_LEVEL, None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => (tracing::Level::TRACE, None),
        "debug" | "verbose" => (tracing::Level::DEBUG, None),
        "info" => (tracing::Level::INFO, None),
        "warn" => (tracing::Level::WARN, None),
        "error" => (tracing::Level::ERROR, None),
        _ => (
            DEFAULT_LOG_LEVEL,
            Some(format!("Invalid `LOG_LEVEL` environment variable value: `{}`", raw.trim())),
        ),
    }
}
