//! Logging system initialization
//!
//! Sets up the tracing subscriber for the `viteloader` binary. The library
//! itself only emits events and never installs a subscriber.

use crate::config::LoggingConfig;

/// Initialize logging based on configuration
///
/// Installs the global subscriber, so call it once at startup.
///
/// Logs go to stderr so command output on stdout stays pipeable, or to
/// `config.file` (appended) when set. `RUST_LOG` overrides `config.level`.
///
/// # Returns
/// * `WorkerGuard` - Must be kept alive for the duration of the program
///   to ensure non-blocking log writes are flushed
///
/// # Errors
/// * If the log file cannot be opened
pub fn init_logging(
    config: &LoggingConfig,
) -> std::io::Result<tracing_appender::non_blocking::WorkerGuard> {
    let writer: Box<dyn std::io::Write + Send + Sync> = match config.file.as_deref() {
        Some(log_file) if !log_file.is_empty() => Box::new(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)?,
        ),
        _ => Box::new(std::io::stderr()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.level.clone()));

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(config.file.as_ref().is_none_or(|f| f.is_empty()));

    if config.format == "json" {
        subscriber_builder.json().init();
    } else {
        subscriber_builder.init();
    }

    Ok(guard)
}
