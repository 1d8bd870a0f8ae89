//! Tracing subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use std::sync::Arc;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the log file inside the workflow cache directory.
pub const LOG_FILE_NAME: &str = "scriptfilter.log";

/// Installs the global tracing subscriber.
///
/// - Filter: `RUST_LOG` when set, otherwise `debug` in debug mode and `warn` otherwise.
/// - Standard error: only in debug mode, since the launcher shows stderr in its
///   workflow debugger and would otherwise discard it.
/// - Log file: `<cache dir>/scriptfilter.log` when `log_to_file` is set, rotated
///   by [`FileWriter`].
///
/// Standard output is never written to; it belongs to the result document.
/// Calling this more than once is harmless, only the first call takes effect.
///
/// # Example
///
/// ```rust
/// use scriptfilter::observability::init_logging;
/// use scriptfilter::Config;
///
/// let config = Config {
///     debug: true,
///     ..Default::default()
/// };
///
/// init_logging(&config);
/// tracing::debug!("logging is now active");
/// ```
pub fn init_logging(config: &Config) {
    let default_level = if config.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = config.debug.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(ChronoLocal::rfc_3339())
            .with_target(false)
            .with_ansi(false)
    });

    let file_layer = if config.log_to_file {
        let log_path = config.cache_dir().join(LOG_FILE_NAME);
        let writer = Arc::new(FileWriter::new(log_path));
        Some(
            fmt::layer()
                .with_writer(writer)
                .with_timer(ChronoLocal::rfc_3339())
                .with_ansi(false),
        )
    } else {
        None
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
}
