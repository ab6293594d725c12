//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "foodiepal.log";

/// Initializes the global tracing subscriber.
///
/// # Trace Level Resolution
///
/// Level is determined by:
/// 1. `RUST_LOG` environment variable, if set and valid
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # File Location
///
/// Events are written to `foodiepal.log` in the data directory, rotated at
/// 10 MB with three backups. If the directory cannot be created the
/// subscriber writes to stderr instead.
///
/// Idempotent: only the first call installs a subscriber.
///
/// # Example
///
/// ```rust
/// use foodiepal::observability::init_tracing;
/// use foodiepal::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     data_dir: Some(std::env::temp_dir().join("foodiepal-doc")),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let data_dir = get_data_dir(config);
    let result = match std::fs::create_dir_all(&data_dir) {
        Ok(()) => {
            let writer = Arc::new(FileWriter::new(data_dir.join(LOG_FILE_NAME)));
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()
        }
        Err(e) => {
            eprintln!("foodiepal: cannot create {}: {e}, logging to stderr", data_dir.display());
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init()
        }
    };

    if result.is_ok() {
        tracing::debug!(data_dir = %data_dir.display(), trace_level = level, "tracing initialized");
    }
}
