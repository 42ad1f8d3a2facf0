//! Logging system initialization
//!
//! Sets up `tracing` with an environment-overridable filter, console
//! output, and optional daily-rotated file output next to the executable.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

pub use crate::infrastructure::config::LoggingConfig;

const LOG_FILE_PREFIX: &str = "ozon-catalog-sync.log";

/// Get the log directory relative to the executable location.
pub fn get_log_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    exe_dir.join("logs")
}

/// Initialize the logging system.
///
/// `RUST_LOG` overrides the configured level entirely. Without it, HTTP
/// stack internals are kept quiet unless trace level is requested.
///
/// Returns the file writer guard, which must stay alive for the duration
/// of the process when file output is enabled.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut filter = EnvFilter::new(&config.level);

        if !config.level.eq_ignore_ascii_case("trace") {
            filter = filter
                .add_directive("reqwest=info".parse().unwrap())
                .add_directive("hyper=warn".parse().unwrap())
                .add_directive("h2=warn".parse().unwrap())
                .add_directive("tokio=info".parse().unwrap());
        }

        filter
    });

    let console_layer = fmt::layer().with_target(false);
    let registry = Registry::default().with(env_filter).with(console_layer);

    if config.file_output {
        let log_dir = get_log_directory();
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {log_dir:?}"))?;

        let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(file_appender);
        let file_layer = fmt::layer().with_ansi(false).with_writer(writer);

        registry
            .with(file_layer)
            .try_init()
            .context("Failed to initialize logging")?;
        Ok(Some(guard))
    } else {
        registry
            .try_init()
            .context("Failed to initialize logging")?;
        Ok(None)
    }
}
